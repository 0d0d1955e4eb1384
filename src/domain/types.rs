//! Shared domain enumerations aligned with persisted database enums.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Workflow state of a news item. Any state may move to any other.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "news_status", rename_all = "snake_case")]
pub enum NewsStatus {
    #[default]
    Published,
    Draft,
    Archived,
}

impl NewsStatus {
    pub const ALL: [NewsStatus; 3] = [
        NewsStatus::Published,
        NewsStatus::Draft,
        NewsStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NewsStatus::Published => "published",
            NewsStatus::Draft => "draft",
            NewsStatus::Archived => "archived",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NewsStatus::Published => "Published",
            NewsStatus::Draft => "Draft",
            NewsStatus::Archived => "Archived",
        }
    }

    /// Comma separated list of accepted values, used in validation messages.
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|status| status.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parses an optional, untrusted filter value. Blank or unknown values yield `None`.
    pub fn parse_filter(value: Option<&str>) -> Option<Self> {
        value.and_then(|raw| raw.trim().parse().ok())
    }
}

impl fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNewsStatus(pub String);

impl fmt::Display for UnknownNewsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown news status `{}`", self.0)
    }
}

impl std::error::Error for UnknownNewsStatus {}

impl FromStr for NewsStatus {
    type Err = UnknownNewsStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "published" => Ok(NewsStatus::Published),
            "draft" => Ok(NewsStatus::Draft),
            "archived" => Ok(NewsStatus::Archived),
            other => Err(UnknownNewsStatus(other.to_string())),
        }
    }
}
