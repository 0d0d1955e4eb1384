use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Transaction};

use crate::application::repos::{
    CreateNewsParams, ImportOutcome, NewsWriteRepo, RepoError, StatusChange, UpdateNewsParams,
};
use crate::domain::entities::NewsRecord;
use crate::domain::types::NewsStatus;
use crate::infra::db::map_sqlx_error;

use super::types::NewsRow;
use super::{NEWS_COLUMNS, PostgresRepositories};

impl PostgresRepositories {
    async fn insert_news(
        tx: &mut Transaction<'_, Postgres>,
        params: CreateNewsParams,
    ) -> Result<NewsRecord, RepoError> {
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "INSERT INTO news (title, content, date, link, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {NEWS_COLUMNS}"
        ))
        .bind(params.title)
        .bind(params.content)
        .bind(params.date)
        .bind(params.link)
        .bind(params.status)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(NewsRecord::from(row))
    }
}

#[async_trait]
impl NewsWriteRepo for PostgresRepositories {
    async fn create_news(&self, params: CreateNewsParams) -> Result<NewsRecord, RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;
        let record = Self::insert_news(&mut tx, params).await?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(record)
    }

    async fn update_news(
        &self,
        id: i64,
        params: UpdateNewsParams,
    ) -> Result<NewsRecord, RepoError> {
        let UpdateNewsParams {
            title,
            content,
            date,
            link,
            status,
        } = params;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE news SET updated_at = GREATEST(now(), created_at)");
        if let Some(title) = title {
            qb.push(", title = ");
            qb.push_bind(title);
        }
        if let Some(content) = content {
            qb.push(", content = ");
            qb.push_bind(content);
        }
        if let Some(date) = date {
            qb.push(", date = ");
            qb.push_bind(date);
        }
        if let Some(link) = link {
            qb.push(", link = ");
            qb.push_bind(link);
        }
        if let Some(status) = status {
            qb.push(", status = ");
            qb.push_bind(status);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING ");
        qb.push(NEWS_COLUMNS);

        let mut tx = self.begin().await.map_err(map_sqlx_error)?;
        let row = qb
            .build_query_as::<NewsRow>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(RepoError::NotFound)?;
        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(NewsRecord::from(row))
    }

    async fn update_news_status(
        &self,
        id: i64,
        status: NewsStatus,
    ) -> Result<StatusChange, RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        let previous =
            sqlx::query_scalar::<_, NewsStatus>("SELECT status FROM news WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_sqlx_error)?
                .ok_or(RepoError::NotFound)?;

        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "UPDATE news SET status = $2, updated_at = GREATEST(now(), created_at) \
             WHERE id = $1 RETURNING {NEWS_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(StatusChange {
            previous,
            record: NewsRecord::from(row),
        })
    }

    async fn delete_news(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn import_news(
        &self,
        items: Vec<CreateNewsParams>,
    ) -> Result<ImportOutcome, RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        // Blocks concurrent writers until the emptiness check and the inserts commit.
        sqlx::query("LOCK TABLE news IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if existing > 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Ok(ImportOutcome::SkippedNonEmpty {
                existing: Self::convert_count(existing)?,
            });
        }

        let mut inserted = 0u64;
        for params in items {
            Self::insert_news(&mut tx, params).await?;
            inserted += 1;
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(ImportOutcome::Imported { inserted })
    }
}
