//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::domain::types::NewsStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsRecord {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub date: Date,
    pub link: Option<String>,
    pub status: NewsStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl NewsRecord {
    pub fn is_published(&self) -> bool {
        self.status == NewsStatus::Published
    }
}
