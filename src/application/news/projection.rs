//! Serialized views of a news item: the full record for editors and a public subset.

use serde::Serialize;

use crate::domain::{
    entities::NewsRecord,
    news::{format_news_date, format_news_timestamp},
    types::NewsStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullNewsView {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub date: String,
    pub link: Option<String>,
    pub status: NewsStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Omits workflow state. Only published items have a public view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicNewsView {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub date: String,
    pub link: Option<String>,
    pub created_at: String,
}

impl From<&NewsRecord> for FullNewsView {
    fn from(record: &NewsRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            content: record.content.clone(),
            date: format_news_date(record.date),
            link: record.link.clone(),
            status: record.status,
            created_at: format_news_timestamp(record.created_at),
            updated_at: format_news_timestamp(record.updated_at),
        }
    }
}

impl PublicNewsView {
    pub fn from_record(record: &NewsRecord) -> Option<Self> {
        if !record.is_published() {
            return None;
        }
        Some(Self {
            id: record.id,
            title: record.title.clone(),
            content: record.content.clone(),
            date: format_news_date(record.date),
            link: record.link.clone(),
            created_at: format_news_timestamp(record.created_at),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProjectedNews {
    Full(FullNewsView),
    Public(PublicNewsView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsProjection {
    Full,
    Public,
}

impl NewsProjection {
    /// An explicit `view` (`public` or `full`) wins. Without one, asking for
    /// `status=published` selects the public view.
    pub fn resolve(view: Option<&str>, status: Option<&str>) -> Self {
        match view.map(str::trim) {
            Some("public") => return NewsProjection::Public,
            Some("full") => return NewsProjection::Full,
            _ => {}
        }

        match NewsStatus::parse_filter(status) {
            Some(NewsStatus::Published) => NewsProjection::Public,
            _ => NewsProjection::Full,
        }
    }

    pub fn project(self, record: &NewsRecord) -> Option<ProjectedNews> {
        match self {
            NewsProjection::Full => Some(ProjectedNews::Full(FullNewsView::from(record))),
            NewsProjection::Public => PublicNewsView::from_record(record).map(ProjectedNews::Public),
        }
    }

    pub fn project_all<'a>(
        self,
        records: impl IntoIterator<Item = &'a NewsRecord>,
    ) -> Vec<ProjectedNews> {
        records
            .into_iter()
            .filter_map(|record| self.project(record))
            .collect()
    }
}
