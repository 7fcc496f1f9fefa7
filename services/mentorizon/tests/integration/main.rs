
mod booking_test;
mod dashboard_test;
mod meeting_test;
mod mentor_test;
mod rating_test;
