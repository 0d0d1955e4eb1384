//! In-process repository used for the `testing` environment and `memory://` database URLs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::application::pagination::{OffsetPage, PageMeta};
use crate::application::query::{NewsQuery, compare_news};
use crate::application::repos::{
    CreateNewsParams, HealthRepo, ImportOutcome, NewsRepo, NewsWriteRepo, RepoError, StatusChange,
    UpdateNewsParams,
};
use crate::domain::entities::NewsRecord;
use crate::domain::types::NewsStatus;

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, NewsRecord>,
}

impl MemoryState {
    fn insert(&mut self, params: CreateNewsParams) -> NewsRecord {
        self.last_id += 1;
        let now = OffsetDateTime::now_utc();
        let record = NewsRecord {
            id: self.last_id,
            title: params.title,
            content: params.content,
            date: params.date,
            link: params.link,
            status: params.status,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(record.id, record.clone());
        record
    }
}

/// Writers hold the lock for the whole operation, so each write is atomic.
#[derive(Default)]
pub struct InMemoryRepositories {
    state: RwLock<MemoryState>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

fn touch(record: &mut NewsRecord) {
    record.updated_at = OffsetDateTime::now_utc().max(record.created_at);
}

#[async_trait]
impl NewsRepo for InMemoryRepositories {
    async fn list_news(&self, query: &NewsQuery) -> Result<OffsetPage<NewsRecord>, RepoError> {
        let state = self.state.read().await;
        let mut matching: Vec<&NewsRecord> = state
            .rows
            .values()
            .filter(|record| query.filter.matches(record))
            .collect();
        matching.sort_by(|a, b| compare_news(a, b));

        let total = matching.len() as u64;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(query.page.per_page as usize)
            .cloned()
            .collect();

        Ok(OffsetPage::new(items, PageMeta::new(query.page, total)))
    }

    async fn find_news(&self, id: i64) -> Result<Option<NewsRecord>, RepoError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn count_news(&self, status: Option<NewsStatus>) -> Result<u64, RepoError> {
        let state = self.state.read().await;
        let count = state
            .rows
            .values()
            .filter(|record| status.is_none_or(|status| record.status == status))
            .count();
        Ok(count as u64)
    }

    async fn latest_news(&self, limit: u32) -> Result<Vec<NewsRecord>, RepoError> {
        let state = self.state.read().await;
        let mut records: Vec<&NewsRecord> = state.rows.values().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NewsWriteRepo for InMemoryRepositories {
    async fn create_news(&self, params: CreateNewsParams) -> Result<NewsRecord, RepoError> {
        Ok(self.state.write().await.insert(params))
    }

    async fn update_news(
        &self,
        id: i64,
        params: UpdateNewsParams,
    ) -> Result<NewsRecord, RepoError> {
        let mut state = self.state.write().await;
        let record = state.rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        params.apply_to(record);
        touch(record);
        Ok(record.clone())
    }

    async fn update_news_status(
        &self,
        id: i64,
        status: NewsStatus,
    ) -> Result<StatusChange, RepoError> {
        let mut state = self.state.write().await;
        let record = state.rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        let previous = record.status;
        record.status = status;
        touch(record);
        Ok(StatusChange {
            previous,
            record: record.clone(),
        })
    }

    async fn delete_news(&self, id: i64) -> Result<(), RepoError> {
        self.state
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn import_news(
        &self,
        items: Vec<CreateNewsParams>,
    ) -> Result<ImportOutcome, RepoError> {
        let mut state = self.state.write().await;
        if !state.rows.is_empty() {
            return Ok(ImportOutcome::SkippedNonEmpty {
                existing: state.rows.len() as u64,
            });
        }

        let mut inserted = 0u64;
        for params in items {
            state.insert(params);
            inserted += 1;
        }
        Ok(ImportOutcome::Imported { inserted })
    }
}

#[async_trait]
impl HealthRepo for InMemoryRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
