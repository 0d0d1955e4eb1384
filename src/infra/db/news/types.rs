use time::{Date, OffsetDateTime};

use crate::domain::entities::NewsRecord;
use crate::domain::types::NewsStatus;

#[derive(sqlx::FromRow)]
pub(crate) struct NewsRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: Option<String>,
    pub(crate) date: Date,
    pub(crate) link: Option<String>,
    pub(crate) status: NewsStatus,
    pub(crate) created_at: OffsetDateTime,
    pub(crate) updated_at: OffsetDateTime,
}

impl From<NewsRow> for NewsRecord {
    fn from(row: NewsRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            date: row.date,
            link: row.link,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
