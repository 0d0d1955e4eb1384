//! Application services layer.

pub mod admin;
pub mod error;
pub mod import;
pub mod news;
pub mod pagination;
pub mod query;
pub mod repos;
