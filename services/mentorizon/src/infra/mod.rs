pub mod db;
pub mod query;
