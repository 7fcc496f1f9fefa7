//! Auth types shared across the Mentorizon workspace.
//!
//! Login and sessions are terminated at the gateway; services only see the
//! resolved actor through the `IdentityHeaders` extractor.

pub mod identity;
