//! Postgres-backed repository implementations.

mod news;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{
    Postgres, QueryBuilder, Transaction,
    postgres::{PgPool, PgPoolOptions},
    query,
};

use crate::application::query::NewsFilter;
use crate::application::repos::{HealthRepo, RepoError};

const NEWS_COLUMNS: &str = "id, title, content, date, link, status, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn begin(&self) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        query("SELECT 1").execute(self.pool()).await.map(|_| ())
    }

    fn apply_news_filter<'q>(qb: &mut QueryBuilder<'q, Postgres>, filter: &'q NewsFilter) {
        if let Some(status) = filter.status {
            qb.push(" AND n.status = ");
            qb.push_bind(status);
        }

        if let Some(from) = filter.date_from {
            qb.push(" AND n.date >= ");
            qb.push_bind(from);
        }

        if let Some(to) = filter.date_to {
            qb.push(" AND n.date <= ");
            qb.push_bind(to);
        }

        if let Some(search) = filter.search.as_ref() {
            let pattern = format!("%{}%", escape_like(search));
            qb.push(" AND (n.title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" ESCAPE '\\' OR n.content ILIKE ");
            qb.push_bind(pattern);
            qb.push(" ESCAPE '\\')");
        }
    }

    fn convert_count(value: i64) -> Result<u64, RepoError> {
        value
            .try_into()
            .map_err(|_| RepoError::from_persistence("count exceeds supported range"))
    }
}

#[async_trait]
impl HealthRepo for PostgresRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        self.health_check().await.map_err(map_sqlx_error)
    }
}

/// Escape LIKE metacharacters so user input is matched literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
