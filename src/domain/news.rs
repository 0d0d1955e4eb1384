//! Field rules for news items: normalization, limits and the wire date formats.

use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::domain::{error::DomainError, types::NewsStatus};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_CONTENT_CHARS: usize = 5000;
pub const MAX_LINK_CHARS: usize = 500;

pub const NEWS_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
pub const NEWS_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Collapse whitespace runs into single spaces and cap the result at `max_chars` characters.
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(max_chars).collect();
    truncated.trim_end().to_string()
}

pub fn normalize_title(value: Option<&str>) -> Result<String, DomainError> {
    let title = sanitize_text(value.unwrap_or_default(), MAX_TITLE_CHARS);
    if title.is_empty() {
        return Err(DomainError::validation("title", "title is required"));
    }
    Ok(title)
}

pub fn normalize_content(value: Option<&str>) -> Option<String> {
    let content = sanitize_text(value.unwrap_or_default(), MAX_CONTENT_CHARS);
    (!content.is_empty()).then_some(content)
}

pub fn normalize_link(value: Option<&str>) -> Result<Option<String>, DomainError> {
    let link = value.map(str::trim).unwrap_or_default();
    if link.is_empty() {
        return Ok(None);
    }
    if link.chars().count() > MAX_LINK_CHARS {
        return Err(DomainError::validation(
            "link",
            format!("link must be at most {MAX_LINK_CHARS} characters"),
        ));
    }
    Ok(Some(link.to_string()))
}

pub fn parse_news_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), NEWS_DATE_FORMAT).ok()
}

pub fn require_news_date(value: Option<&str>) -> Result<Date, DomainError> {
    let raw = value.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(DomainError::validation("date", "date is required"));
    }
    parse_news_date(raw)
        .ok_or_else(|| DomainError::validation("date", "date must use the YYYY-MM-DD format"))
}

/// Strict status parsing for updates and status changes.
pub fn require_status(value: Option<&str>) -> Result<NewsStatus, DomainError> {
    let raw = value.map(str::trim).unwrap_or_default();
    raw.parse().map_err(|_| {
        DomainError::validation(
            "status",
            format!(
                "status must be one of: {}",
                NewsStatus::allowed_values()
            ),
        )
    })
}

/// Lenient status parsing used on create: unknown values fall back to published.
pub fn status_or_default(value: Option<&str>) -> NewsStatus {
    NewsStatus::parse_filter(value).unwrap_or_default()
}

pub fn format_news_date(date: Date) -> String {
    date.format(NEWS_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

pub fn format_news_timestamp(at: OffsetDateTime) -> String {
    at.format(NEWS_TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| at.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn sanitize_collapses_whitespace() {
        assert_eq!(
            sanitize_text("  Campus \n\t open   day ", 200),
            "Campus open day"
        );
    }

    #[test]
    fn sanitize_truncates_by_characters() {
        let input = "é".repeat(300);
        let output = sanitize_text(&input, MAX_TITLE_CHARS);
        assert_eq!(output.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn title_must_not_be_blank() {
        let err = normalize_title(Some("   \n ")).expect_err("blank title rejected");
        assert_eq!(err.field(), Some("title"));
        assert!(normalize_title(None).is_err());
    }

    #[test]
    fn empty_link_becomes_absent() {
        assert_eq!(normalize_link(Some("   ")), Ok(None));
        assert_eq!(
            normalize_link(Some(" https://example.com/a ")),
            Ok(Some("https://example.com/a".to_string()))
        );
        let long = format!("https://example.com/{}", "a".repeat(MAX_LINK_CHARS));
        assert!(normalize_link(Some(&long)).is_err());
    }

    #[test]
    fn empty_content_becomes_absent() {
        assert_eq!(normalize_content(Some(" \n ")), None);
        assert_eq!(normalize_content(None), None);
    }

    #[test]
    fn dates_use_fixed_format() {
        assert_eq!(parse_news_date("2025-09-10"), Some(date!(2025 - 09 - 10)));
        assert_eq!(parse_news_date("2025/09/10"), None);
        assert_eq!(parse_news_date("2025-13-01"), None);

        let missing = require_news_date(Some("")).expect_err("missing date");
        assert_eq!(missing.to_string(), "date is required");
        let malformed = require_news_date(Some("10-09-2025")).expect_err("malformed date");
        assert_eq!(malformed.field(), Some("date"));
    }

    #[test]
    fn status_parsing_modes() {
        assert_eq!(status_or_default(Some("bogus")), NewsStatus::Published);
        assert_eq!(status_or_default(Some("draft")), NewsStatus::Draft);
        let err = require_status(Some("bogus")).expect_err("strict parsing");
        assert_eq!(
            err.to_string(),
            "status must be one of: published, draft, archived"
        );
    }

    #[test]
    fn formats_wire_values() {
        assert_eq!(format_news_date(date!(2025 - 09 - 01)), "2025-09-01");
        assert_eq!(
            format_news_timestamp(datetime!(2025-09-01 08:05:09 UTC)),
            "2025-09-01 08:05:09"
        );
    }
}
