//! sea-orm entities for the Mentorizon database.

pub mod meeting_participants;
pub mod meetings;
pub mod rating_votes;
pub mod spheres;
pub mod users;
