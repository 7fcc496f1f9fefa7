//! Test utilities for the Mentorizon service.
//!
//! Import in `#[cfg(test)]` blocks and integration tests only, never in production code.

pub mod auth;
