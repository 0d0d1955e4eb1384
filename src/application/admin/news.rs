//! View builders for the news screens of the admin console.

use time::{Date, OffsetDateTime};
use url::form_urlencoded;

use crate::application::{
    news::{CreateNewsCommand, NewsStatusCounts},
    pagination::OffsetPage,
    query::NewsQuery,
};
use crate::domain::{
    entities::NewsRecord,
    news::{format_news_date, format_news_timestamp},
    types::NewsStatus,
};
use crate::presentation::admin::views::{
    AdminNewsFormView, AdminNewsListView, AdminNewsRowView, AdminPaginationView,
    AdminStatusFilterView, AdminStatusOptionView,
};

const LIST_PATH: &str = "/news";

pub fn status_options(selected: Option<NewsStatus>) -> Vec<AdminStatusOptionView> {
    NewsStatus::ALL
        .iter()
        .map(|status| AdminStatusOptionView {
            value: status.as_str(),
            label: status.label(),
            selected: selected == Some(*status),
        })
        .collect()
}

pub fn row_view(record: &NewsRecord) -> AdminNewsRowView {
    AdminNewsRowView {
        id: record.id,
        title: record.title.clone(),
        date: format_news_date(record.date),
        link: record.link.clone().unwrap_or_default(),
        status_key: record.status.as_str(),
        status_label: record.status.label(),
        created_at: format_news_timestamp(record.created_at),
        updated_at: format_news_timestamp(record.updated_at),
        edit_href: format!("{LIST_PATH}/{}/edit", record.id),
        delete_action: format!("{LIST_PATH}/{}/delete", record.id),
        status_action: format!("{LIST_PATH}/{}/status", record.id),
        status_options: status_options(Some(record.status)),
    }
}

pub fn list_view(
    page: OffsetPage<NewsRecord>,
    counts: NewsStatusCounts,
    query: &NewsQuery,
    default_per_page: u32,
) -> AdminNewsListView {
    let filter = &query.filter;
    let per_page = (query.page.per_page != default_per_page).then_some(query.page.per_page);

    let mut filters = vec![AdminStatusFilterView {
        label: "All".to_string(),
        href: LIST_PATH.to_string(),
        count: counts.total,
        is_active: filter.status.is_none(),
    }];
    filters.extend(NewsStatus::ALL.iter().map(|status| {
        let count = match status {
            NewsStatus::Published => counts.published,
            NewsStatus::Draft => counts.draft,
            NewsStatus::Archived => counts.archived,
        };
        AdminStatusFilterView {
            label: status.label().to_string(),
            href: format!("{LIST_PATH}?status={}", status.as_str()),
            count,
            is_active: filter.status == Some(*status),
        }
    }));

    let meta = page.meta;
    let pagination = AdminPaginationView {
        page: meta.page,
        pages: meta.pages,
        total: meta.total,
        prev_href: meta.prev_num.map(|num| list_href(query, num, per_page)),
        next_href: meta.next_num.map(|num| list_href(query, num, per_page)),
    };

    let has_filters = filter.status.is_some()
        || filter.search.is_some()
        || filter.date_from.is_some()
        || filter.date_to.is_some();

    AdminNewsListView {
        heading: "News".to_string(),
        filters,
        rows: page.items.iter().map(row_view).collect(),
        filter_status: filter
            .status
            .map(|status| status.as_str().to_string())
            .unwrap_or_default(),
        filter_search: filter.search.clone().unwrap_or_default(),
        filter_date_from: filter.date_from.map(format_news_date).unwrap_or_default(),
        filter_date_to: filter.date_to.map(format_news_date).unwrap_or_default(),
        status_options: status_options(filter.status),
        pagination,
        new_href: format!("{LIST_PATH}/new"),
        empty_message: if has_filters {
            "No news items match the current filters.".to_string()
        } else {
            "No news items have been created yet.".to_string()
        },
    }
}

/// Listing URL that keeps the active filters and points at `page`.
pub fn list_href(query: &NewsQuery, page: u32, per_page: Option<u32>) -> String {
    let filter = &query.filter;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(status) = filter.status {
        serializer.append_pair("status", status.as_str());
    }
    if let Some(search) = filter.search.as_deref() {
        serializer.append_pair("search", search);
    }
    if let Some(from) = filter.date_from {
        serializer.append_pair("date_from", &format_news_date(from));
    }
    if let Some(to) = filter.date_to {
        serializer.append_pair("date_to", &format_news_date(to));
    }
    if let Some(per_page) = per_page {
        serializer.append_pair("per_page", &per_page.to_string());
    }
    if page > 1 {
        serializer.append_pair("page", &page.to_string());
    }

    let encoded = serializer.finish();
    if encoded.is_empty() {
        LIST_PATH.to_string()
    } else {
        format!("{LIST_PATH}?{encoded}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsFormMode {
    Create,
    Edit { id: i64 },
}

/// Field values echoed back into the form, either from storage or from a rejected submission.
#[derive(Debug, Clone, Default)]
pub struct NewsFormValues {
    pub title: String,
    pub content: String,
    pub date: String,
    pub link: String,
    pub status: Option<NewsStatus>,
}

impl NewsFormValues {
    /// An empty form dated today.
    pub fn blank() -> Self {
        Self::dated(OffsetDateTime::now_utc().date())
    }

    pub fn dated(date: Date) -> Self {
        Self {
            date: format_news_date(date),
            status: Some(NewsStatus::default()),
            ..Default::default()
        }
    }

    pub fn from_record(record: &NewsRecord) -> Self {
        Self {
            title: record.title.clone(),
            content: record.content.clone().unwrap_or_default(),
            date: format_news_date(record.date),
            link: record.link.clone().unwrap_or_default(),
            status: Some(record.status),
        }
    }

    pub fn from_command(command: &CreateNewsCommand) -> Self {
        Self {
            title: command.title.clone().unwrap_or_default(),
            content: command.content.clone().unwrap_or_default(),
            date: command.date.clone().unwrap_or_default(),
            link: command.link.clone().unwrap_or_default(),
            status: NewsStatus::parse_filter(command.status.as_deref()),
        }
    }
}

pub fn form_view(
    mode: NewsFormMode,
    values: NewsFormValues,
    error: Option<String>,
) -> AdminNewsFormView {
    let (heading, form_action, submit_label) = match mode {
        NewsFormMode::Create => (
            "New news item".to_string(),
            format!("{LIST_PATH}/new"),
            "Create".to_string(),
        ),
        NewsFormMode::Edit { id } => (
            format!("Edit news item #{id}"),
            format!("{LIST_PATH}/{id}/edit"),
            "Save changes".to_string(),
        ),
    };

    AdminNewsFormView {
        heading,
        form_action,
        submit_label,
        cancel_href: LIST_PATH.to_string(),
        title: values.title,
        content: values.content,
        date: values.date,
        link: values.link,
        status_options: status_options(values.status),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pagination::PageMeta;
    use crate::application::query::NewsListParams;
    use time::macros::{date, datetime};

    fn record(id: i64, status: NewsStatus) -> NewsRecord {
        NewsRecord {
            id,
            title: format!("item {id}"),
            content: None,
            date: date!(2025 - 03 - 01),
            link: None,
            status,
            created_at: datetime!(2025-03-01 08:00:00 UTC),
            updated_at: datetime!(2025-03-01 08:00:00 UTC),
        }
    }

    #[test]
    fn blank_form_is_dated_and_published() {
        let values = NewsFormValues::dated(date!(2025 - 03 - 07));
        assert_eq!(values.date, "2025-03-07");
        assert_eq!(values.status, Some(NewsStatus::Published));
        assert!(values.title.is_empty());
    }

    #[test]
    fn list_href_keeps_filters_and_encodes_search() {
        let query = NewsQuery::from_params(
            &NewsListParams {
                status: Some("draft".into()),
                search: Some("exam & results".into()),
                date_from: Some("2025-01-01".into()),
                date_to: Some("not a date".into()),
                ..Default::default()
            },
            10,
        );

        assert_eq!(
            list_href(&query, 3, None),
            "/news?status=draft&search=exam+%26+results&date_from=2025-01-01&page=3"
        );
        assert_eq!(
            list_href(&NewsQuery::from_params(&NewsListParams::default(), 10), 1, None),
            "/news"
        );
    }

    #[test]
    fn list_view_builds_pagination_links() {
        let query = NewsQuery::from_params(
            &NewsListParams {
                page: Some("2".into()),
                per_page: Some("5".into()),
                ..Default::default()
            },
            10,
        );
        let items = vec![record(1, NewsStatus::Published), record(2, NewsStatus::Draft)];
        let page = OffsetPage::new(items, PageMeta::new(query.page, 12));
        let counts = NewsStatusCounts {
            total: 12,
            published: 10,
            draft: 2,
            archived: 0,
        };

        let view = list_view(page, counts, &query, 10);

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.pagination.pages, 3);
        assert_eq!(view.pagination.prev_link(), "/news?per_page=5");
        assert_eq!(view.pagination.next_link(), "/news?per_page=5&page=3");
        assert!(view.filters[0].is_active);
        assert_eq!(view.filters[2].count, 2);
    }

    #[test]
    fn form_view_marks_selected_status() {
        let values = NewsFormValues::from_record(&record(4, NewsStatus::Archived));
        let view = form_view(NewsFormMode::Edit { id: 4 }, values, None);
        assert_eq!(view.form_action, "/news/4/edit");
        let selected: Vec<_> = view
            .status_options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value)
            .collect();
        assert_eq!(selected, vec!["archived"]);
    }
}
