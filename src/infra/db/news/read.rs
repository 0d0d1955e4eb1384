use async_trait::async_trait;
use sqlx::QueryBuilder;

use crate::application::pagination::{OffsetPage, PageMeta};
use crate::application::query::NewsQuery;
use crate::application::repos::{NewsRepo, RepoError};
use crate::domain::entities::NewsRecord;
use crate::domain::types::NewsStatus;
use crate::infra::db::map_sqlx_error;

use super::types::NewsRow;
use super::{NEWS_COLUMNS, PostgresRepositories};

#[async_trait]
impl NewsRepo for PostgresRepositories {
    async fn list_news(&self, query: &NewsQuery) -> Result<OffsetPage<NewsRecord>, RepoError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM news n WHERE 1=1 ");
        Self::apply_news_filter(&mut count_qb, &query.filter);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        let total = Self::convert_count(total)?;

        let offset = i64::try_from(query.page.offset())
            .map_err(|_| RepoError::from_persistence("offset exceeds supported range"))?;

        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(NEWS_COLUMNS);
        qb.push(" FROM news n WHERE 1=1 ");
        Self::apply_news_filter(&mut qb, &query.filter);
        qb.push(" ORDER BY n.date DESC, n.created_at DESC, n.id DESC LIMIT ");
        qb.push_bind(i64::from(query.page.per_page));
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb
            .build_query_as::<NewsRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        let items = rows.into_iter().map(NewsRecord::from).collect();
        Ok(OffsetPage::new(items, PageMeta::new(query.page, total)))
    }

    async fn find_news(&self, id: i64) -> Result<Option<NewsRecord>, RepoError> {
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(NewsRecord::from))
    }

    async fn count_news(&self, status: Option<NewsStatus>) -> Result<u64, RepoError> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM news WHERE status = $1")
                    .bind(status)
                    .fetch_one(self.pool())
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM news")
                    .fetch_one(self.pool())
                    .await
            }
        }
        .map_err(map_sqlx_error)?;

        Self::convert_count(count)
    }

    async fn latest_news(&self, limit: u32) -> Result<Vec<NewsRecord>, RepoError> {
        let rows = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(NewsRecord::from).collect())
    }
}
