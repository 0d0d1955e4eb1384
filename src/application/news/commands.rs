use metrics::counter;
use tracing::{info, warn};

use crate::application::repos::{ImportOutcome, UpdateNewsParams};
use crate::domain::{entities::NewsRecord, news::require_status};

use super::service::NewsService;
use super::types::{
    CreateNewsCommand, ImportReport, NewsError, SkippedImport, UpdateNewsCommand,
};

const WRITES_METRIC: &str = "newsroom_news_writes_total";

impl NewsService {
    pub async fn create(&self, command: CreateNewsCommand) -> Result<NewsRecord, NewsError> {
        let params = command.into_create_params()?;
        let record = self.writer.create_news(params).await?;

        counter!(WRITES_METRIC, "action" => "create").increment(1);
        info!(
            target = "newsroom::news",
            id = record.id,
            status = %record.status,
            "news item created"
        );
        Ok(record)
    }

    /// Apply whichever fields are present in `command`.
    pub async fn update(
        &self,
        id: i64,
        command: UpdateNewsCommand,
    ) -> Result<NewsRecord, NewsError> {
        self.find(id).await?;

        if command.is_empty() {
            return Err(NewsError::empty_body());
        }
        let params = command.into_update_params()?;
        self.write_update(id, params).await
    }

    /// Replace every editable field, as the admin edit form does.
    pub async fn replace(
        &self,
        id: i64,
        command: CreateNewsCommand,
    ) -> Result<NewsRecord, NewsError> {
        self.find(id).await?;

        let params = command.into_replace_params()?;
        self.write_update(id, params).await
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: Option<&str>,
    ) -> Result<NewsRecord, NewsError> {
        self.find(id).await?;

        let status = require_status(status)?;
        let change = self
            .writer
            .update_news_status(id, status)
            .await
            .map_err(|err| NewsError::from_repo(id, err))?;

        counter!(WRITES_METRIC, "action" => "status").increment(1);
        info!(
            target = "newsroom::news",
            id,
            from = %change.previous,
            to = %change.record.status,
            "news status changed"
        );
        Ok(change.record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), NewsError> {
        self.writer
            .delete_news(id)
            .await
            .map_err(|err| NewsError::from_repo(id, err))?;

        counter!(WRITES_METRIC, "action" => "delete").increment(1);
        info!(target = "newsroom::news", id, "news item deleted");
        Ok(())
    }

    /// Validate every item, drop the invalid ones and insert the rest in one unit of work.
    /// Nothing is written when the store already holds news.
    pub async fn import(&self, items: Vec<CreateNewsCommand>) -> Result<ImportReport, NewsError> {
        let mut valid = Vec::with_capacity(items.len());
        let mut skipped = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            match item.into_create_params() {
                Ok(params) => valid.push(params),
                Err(err) => {
                    warn!(
                        target = "newsroom::import",
                        index,
                        error = %err,
                        "skipping invalid import item"
                    );
                    skipped.push(SkippedImport {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let report = match self.writer.import_news(valid).await? {
            ImportOutcome::Imported { inserted } => {
                counter!(WRITES_METRIC, "action" => "import").increment(inserted);
                ImportReport {
                    inserted,
                    existing: None,
                    skipped,
                }
            }
            ImportOutcome::SkippedNonEmpty { existing } => {
                counter!("newsroom_news_import_skipped_total").increment(1);
                ImportReport {
                    inserted: 0,
                    existing: Some(existing),
                    skipped,
                }
            }
        };

        Ok(report)
    }

    async fn write_update(
        &self,
        id: i64,
        params: UpdateNewsParams,
    ) -> Result<NewsRecord, NewsError> {
        let record = self
            .writer
            .update_news(id, params)
            .await
            .map_err(|err| NewsError::from_repo(id, err))?;

        counter!(WRITES_METRIC, "action" => "update").increment(1);
        info!(
            target = "newsroom::news",
            id,
            status = %record.status,
            "news item updated"
        );
        Ok(record)
    }
}
