//! Domain types shared across the Mentorizon workspace.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` converts to and from them.

pub mod pagination;
pub mod rating;
pub mod user;
