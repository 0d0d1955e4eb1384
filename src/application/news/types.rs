use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::application::repos::{CreateNewsParams, RepoError, UpdateNewsParams};
use crate::domain::{
    error::DomainError,
    news::{
        normalize_content, normalize_link, normalize_title, require_news_date, require_status,
        status_or_default,
    },
};

#[derive(Debug, Error)]
pub enum NewsError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("news item {id} not found")]
    NotFound { id: i64 },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl NewsError {
    pub(crate) fn from_repo(id: i64, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => NewsError::NotFound { id },
            other => NewsError::Repo(other),
        }
    }

    pub(crate) fn empty_body() -> Self {
        NewsError::Validation(DomainError::validation("body", "request body is empty"))
    }
}

/// Unvalidated input for a new item, as submitted by a client, a form or an import file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateNewsCommand {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
    pub status: Option<String>,
}

impl CreateNewsCommand {
    /// Validate for insertion. Unknown statuses fall back to published.
    pub(crate) fn into_create_params(self) -> Result<CreateNewsParams, DomainError> {
        Ok(CreateNewsParams {
            title: normalize_title(self.title.as_deref())?,
            date: require_news_date(self.date.as_deref())?,
            content: normalize_content(self.content.as_deref()),
            link: normalize_link(self.link.as_deref())?,
            status: status_or_default(self.status.as_deref()),
        })
    }

    /// Validate as a full replacement of an existing item. Unknown statuses are rejected.
    pub(crate) fn into_replace_params(self) -> Result<UpdateNewsParams, DomainError> {
        let status = require_status(self.status.as_deref())?;
        let params = CreateNewsParams {
            title: normalize_title(self.title.as_deref())?,
            date: require_news_date(self.date.as_deref())?,
            content: normalize_content(self.content.as_deref()),
            link: normalize_link(self.link.as_deref())?,
            status,
        };
        Ok(params.into())
    }
}

/// Partial update. The outer `Option` records whether a key was present at all,
/// the inner one whether it carried `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateNewsCommand {
    #[serde(deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub content: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub date: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub link: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub status: Option<Option<String>>,
}

impl UpdateNewsCommand {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.date.is_none()
            && self.link.is_none()
            && self.status.is_none()
    }

    pub(crate) fn into_update_params(self) -> Result<UpdateNewsParams, DomainError> {
        let title = self
            .title
            .map(|value| normalize_title(value.as_deref()))
            .transpose()?;
        let date = self
            .date
            .map(|value| require_news_date(value.as_deref()))
            .transpose()?;
        let link = self
            .link
            .map(|value| normalize_link(value.as_deref()))
            .transpose()?;
        let status = self
            .status
            .map(|value| require_status(value.as_deref()))
            .transpose()?;
        let content = self
            .content
            .map(|value| normalize_content(value.as_deref()));

        Ok(UpdateNewsParams {
            title,
            content,
            date,
            link,
            status,
        })
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewsStatusCounts {
    pub total: u64,
    pub published: u64,
    pub draft: u64,
    pub archived: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImport {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: u64,
    pub existing: Option<u64>,
    pub skipped: Vec<SkippedImport>,
}

impl ImportReport {
    pub fn was_skipped(&self) -> bool {
        self.existing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::NewsStatus;
    use time::macros::date;

    #[test]
    fn update_command_tracks_key_presence() {
        let command: UpdateNewsCommand =
            serde_json::from_str(r#"{"link": null, "title": "  New   title "}"#)
                .expect("valid payload");
        assert_eq!(command.link, Some(None));
        assert_eq!(command.content, None);

        let params = command.into_update_params().expect("valid update");
        assert_eq!(params.title.as_deref(), Some("New title"));
        assert_eq!(params.link, Some(None));
        assert_eq!(params.content, None);
        assert_eq!(params.date, None);
    }

    #[test]
    fn update_rejects_null_title_and_bad_status() {
        let null_title: UpdateNewsCommand =
            serde_json::from_str(r#"{"title": null}"#).expect("valid payload");
        let err = null_title.into_update_params().expect_err("title required");
        assert_eq!(err.field(), Some("title"));

        let bad_status: UpdateNewsCommand =
            serde_json::from_str(r#"{"status": "hidden"}"#).expect("valid payload");
        let err = bad_status.into_update_params().expect_err("status rejected");
        assert_eq!(err.field(), Some("status"));
    }

    #[test]
    fn empty_update_is_detected() {
        let command: UpdateNewsCommand = serde_json::from_str("{}").expect("valid payload");
        assert!(command.is_empty());
    }

    #[test]
    fn create_command_normalizes_fields() {
        let command = CreateNewsCommand {
            title: Some(" Library   hours ".into()),
            content: Some("Open\n\nlate".into()),
            date: Some("2025-09-05".into()),
            link: Some("".into()),
            status: Some("unknown".into()),
        };

        let params = command.into_create_params().expect("valid command");
        assert_eq!(params.title, "Library hours");
        assert_eq!(params.content.as_deref(), Some("Open late"));
        assert_eq!(params.date, date!(2025 - 09 - 05));
        assert_eq!(params.link, None);
        assert_eq!(params.status, NewsStatus::Published);
    }

    #[test]
    fn replace_requires_known_status() {
        let command = CreateNewsCommand {
            title: Some("Title".into()),
            date: Some("2025-09-05".into()),
            status: Some("unknown".into()),
            ..Default::default()
        };
        let err = command.into_replace_params().expect_err("status rejected");
        assert_eq!(err.field(), Some("status"));
    }
}
