pub mod booking;
pub mod dashboard;
pub mod meeting;
pub mod mentor;
pub mod rating;
pub mod sphere;
pub mod user;

use mentorizon_domain::pagination::{Page, PageRequest};

use crate::error::MentorizonError;

/// Reject a page past the last non-empty one. Page 1 always exists.
fn ensure_page<T>(page: Page<T>, request: PageRequest) -> Result<Page<T>, MentorizonError> {
    if request.is_within(page.total_pages) {
        Ok(page)
    } else {
        Err(MentorizonError::PageNotFound)
    }
}
