pub mod clock;
pub mod filter;
pub mod policy;
pub mod repository;
pub mod types;
