//! Newsroom: news and announcements backend with a JSON API and an admin console.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
