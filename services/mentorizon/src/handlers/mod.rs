pub mod dashboard;
pub mod meeting;
pub mod mentor;
pub mod response;
pub mod sphere;
pub mod user;

use serde::de::DeserializeOwned;

use mentorizon_domain::pagination::PageRequest;

use crate::error::MentorizonError;

/// Parse a raw query string with `serde_qs`; an absent query yields the default.
fn parse_query<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T, MentorizonError> {
    raw.map(serde_qs::from_str)
        .transpose()
        .map_err(|_| MentorizonError::MissingData)
        .map(Option::unwrap_or_default)
}

/// `page` must be a positive integer whose row offset fits in `u64`;
/// anything else is a missing page.
fn parse_page(page: Option<&str>) -> Result<PageRequest, MentorizonError> {
    match page.map(str::trim) {
        None | Some("") => Ok(PageRequest::default()),
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|&p| p > 0)
            .map(PageRequest::new)
            .filter(|page| page.offset().is_some())
            .ok_or(MentorizonError::PageNotFound),
    }
}
