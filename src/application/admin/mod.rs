//! Application services for the administrative surface.

pub mod chrome;
pub mod dashboard;
pub mod news;
