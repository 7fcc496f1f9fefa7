//! Service plumbing shared by Mentorizon binaries: configuration loading,
//! health handlers, request-id middleware, tracing setup and sea-orm helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
