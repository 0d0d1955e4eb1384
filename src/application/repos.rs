//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::Date;

use crate::application::pagination::OffsetPage;
use crate::application::query::NewsQuery;
use crate::domain::entities::NewsRecord;
use crate::domain::types::NewsStatus;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Fully validated values for a new news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNewsParams {
    pub title: String,
    pub content: Option<String>,
    pub date: Date,
    pub link: Option<String>,
    pub status: NewsStatus,
}

/// Partial update. `None` leaves a column untouched; for nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateNewsParams {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub date: Option<Date>,
    pub link: Option<Option<String>>,
    pub status: Option<NewsStatus>,
}

impl UpdateNewsParams {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.date.is_none()
            && self.link.is_none()
            && self.status.is_none()
    }

    /// Apply the present fields onto `record`. Timestamps are left to the caller.
    pub fn apply_to(&self, record: &mut NewsRecord) {
        if let Some(title) = self.title.as_ref() {
            record.title = title.clone();
        }
        if let Some(content) = self.content.as_ref() {
            record.content = content.clone();
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(link) = self.link.as_ref() {
            record.link = link.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
    }
}

impl From<CreateNewsParams> for UpdateNewsParams {
    fn from(params: CreateNewsParams) -> Self {
        Self {
            title: Some(params.title),
            content: Some(params.content),
            date: Some(params.date),
            link: Some(params.link),
            status: Some(params.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: NewsStatus,
    pub record: NewsRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported { inserted: u64 },
    SkippedNonEmpty { existing: u64 },
}

#[async_trait]
pub trait NewsRepo: Send + Sync {
    async fn list_news(&self, query: &NewsQuery) -> Result<OffsetPage<NewsRecord>, RepoError>;

    async fn find_news(&self, id: i64) -> Result<Option<NewsRecord>, RepoError>;

    async fn count_news(&self, status: Option<NewsStatus>) -> Result<u64, RepoError>;

    /// Most recently created items first.
    async fn latest_news(&self, limit: u32) -> Result<Vec<NewsRecord>, RepoError>;
}

/// Each method runs as a single atomic unit of work.
#[async_trait]
pub trait NewsWriteRepo: Send + Sync {
    async fn create_news(&self, params: CreateNewsParams) -> Result<NewsRecord, RepoError>;

    async fn update_news(
        &self,
        id: i64,
        params: UpdateNewsParams,
    ) -> Result<NewsRecord, RepoError>;

    async fn update_news_status(
        &self,
        id: i64,
        status: NewsStatus,
    ) -> Result<StatusChange, RepoError>;

    async fn delete_news(&self, id: i64) -> Result<(), RepoError>;

    /// Insert every item, unless the store already contains news.
    async fn import_news(&self, items: Vec<CreateNewsParams>)
    -> Result<ImportOutcome, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
