//! Filter, sort and paginate rules shared by every listing surface and storage backend.

use std::{cmp::Ordering, collections::HashMap, fmt};

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use time::Date;

use crate::application::pagination::PageRequest;
use crate::domain::{entities::NewsRecord, news::parse_news_date, types::NewsStatus};

/// Raw listing parameters exactly as received from a query string.
///
/// A repeated key keeps its first value, and `limit` stands in for `per_page`
/// when the latter is absent. Unknown keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct NewsListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl NewsListParams {
    fn from_pairs(mut pairs: HashMap<String, String>) -> Self {
        let per_page = pairs
            .remove("per_page")
            .or_else(|| pairs.remove("limit"));
        Self {
            page: pairs.remove("page"),
            per_page,
            status: pairs.remove("status"),
            search: pairs.remove("search"),
            date_from: pairs.remove("date_from"),
            date_to: pairs.remove("date_to"),
        }
    }
}

impl<'de> Deserialize<'de> for NewsListParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer
            .deserialize_map(FirstValues)
            .map(NewsListParams::from_pairs)
    }
}

/// Collects string pairs, keeping the first value seen for each key.
pub struct FirstValues;

impl<'de> Visitor<'de> for FirstValues {
    type Value = HashMap<String, String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of query parameters")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = HashMap::new();
        while let Some((key, value)) = map.next_entry::<String, String>()? {
            pairs.entry(key).or_insert(value);
        }
        Ok(pairs)
    }
}

/// Normalized filter. Invalid inputs have already been dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    pub status: Option<NewsStatus>,
    pub search: Option<String>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub filter: NewsFilter,
    pub page: PageRequest,
}

impl NewsQuery {
    pub fn from_params(params: &NewsListParams, default_per_page: u32) -> Self {
        let page = PageRequest::normalize(
            parse_int(params.page.as_deref()),
            parse_int(params.per_page.as_deref()),
            default_per_page,
        );

        Self {
            filter: NewsFilter::from_params(params),
            page,
        }
    }
}

impl NewsFilter {
    pub fn from_params(params: &NewsListParams) -> Self {
        Self {
            status: NewsStatus::parse_filter(params.status.as_deref()),
            search: blank_to_none(params.search.as_deref()),
            date_from: params.date_from.as_deref().and_then(parse_news_date),
            date_to: params.date_to.as_deref().and_then(parse_news_date),
        }
    }

    /// Case-insensitive substring match against title or content, inclusive date bounds.
    pub fn matches(&self, record: &NewsRecord) -> bool {
        if let Some(status) = self.status
            && record.status != status
        {
            return false;
        }

        if let Some(from) = self.date_from
            && record.date < from
        {
            return false;
        }

        if let Some(to) = self.date_to
            && record.date > to
        {
            return false;
        }

        match self.search.as_deref() {
            Some(needle) => {
                let needle = needle.to_lowercase();
                record.title.to_lowercase().contains(&needle)
                    || record
                        .content
                        .as_deref()
                        .is_some_and(|content| content.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Listing order: newest `date` first, then newest `created_at`, then highest id.
pub fn compare_news(a: &NewsRecord, b: &NewsRecord) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

pub(crate) fn blank_to_none(value: Option<&str>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|raw| raw.trim().parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn record(id: i64, date: Date, title: &str, content: Option<&str>) -> NewsRecord {
        NewsRecord {
            id,
            title: title.to_string(),
            content: content.map(str::to_string),
            date,
            link: None,
            status: NewsStatus::Published,
            created_at: datetime!(2025-01-01 00:00 UTC),
            updated_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    #[test]
    fn repeated_keys_keep_their_first_value() {
        let params: NewsListParams = serde_json::from_str(
            r#"{"status":"draft","status":"published","limit":"5","per_page":"7","sort":"x"}"#,
        )
        .expect("params");

        assert_eq!(params.status.as_deref(), Some("draft"));
        assert_eq!(params.per_page.as_deref(), Some("7"));

        let params: NewsListParams =
            serde_json::from_str(r#"{"limit":"5","limit":"9"}"#).expect("params");
        assert_eq!(params.per_page.as_deref(), Some("5"));
    }

    #[test]
    fn params_are_normalized() {
        let params = NewsListParams {
            page: Some("abc".into()),
            per_page: Some("250".into()),
            status: Some("deleted".into()),
            search: Some("   ".into()),
            date_from: Some("2025-02-30".into()),
            date_to: Some("2025-03-01".into()),
        };

        let query = NewsQuery::from_params(&params, 10);
        assert_eq!(query.page, PageRequest::normalize(None, None, 10));
        assert_eq!(
            query.filter,
            NewsFilter {
                status: None,
                search: None,
                date_from: None,
                date_to: Some(date!(2025 - 03 - 01)),
            }
        );
    }

    #[test]
    fn search_matches_title_or_content_case_insensitively() {
        let filter = NewsFilter {
            search: Some("ENROL".into()),
            ..Default::default()
        };
        assert!(filter.matches(&record(1, date!(2025 - 01 - 01), "Enrolment opens", None)));
        assert!(filter.matches(&record(
            2,
            date!(2025 - 01 - 01),
            "Notice",
            Some("late enrolment")
        )));
        assert!(!filter.matches(&record(3, date!(2025 - 01 - 01), "Notice", None)));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = NewsFilter {
            date_from: Some(date!(2025 - 01 - 10)),
            date_to: Some(date!(2025 - 01 - 20)),
            ..Default::default()
        };
        assert!(filter.matches(&record(1, date!(2025 - 01 - 10), "a", None)));
        assert!(filter.matches(&record(2, date!(2025 - 01 - 20), "b", None)));
        assert!(!filter.matches(&record(3, date!(2025 - 01 - 21), "c", None)));
        assert!(!filter.matches(&record(4, date!(2025 - 01 - 09), "d", None)));
    }

    #[test]
    fn status_filter_excludes_other_states() {
        let filter = NewsFilter {
            status: Some(NewsStatus::Published),
            ..Default::default()
        };
        let mut draft = record(1, date!(2025 - 01 - 01), "draft", None);
        draft.status = NewsStatus::Draft;
        assert!(!filter.matches(&draft));
    }

    #[test]
    fn ordering_uses_date_then_creation_time() {
        let mut older_created = record(1, date!(2025 - 05 - 01), "a", None);
        older_created.created_at = datetime!(2025-05-01 08:00 UTC);
        let mut newer_created = record(2, date!(2025 - 05 - 01), "b", None);
        newer_created.created_at = datetime!(2025-05-01 09:00 UTC);
        let later_date = record(3, date!(2025 - 06 - 01), "c", None);

        let mut items = vec![older_created.clone(), later_date.clone(), newer_created.clone()];
        items.sort_by(compare_news);

        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
