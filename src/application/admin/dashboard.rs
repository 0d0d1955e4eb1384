use std::sync::Arc;

use crate::application::{error::HttpError, news::NewsService};
use crate::presentation::admin::views::{AdminDashboardView, AdminMetricView};

use super::news::row_view;

const RECENT_LIMIT: u32 = 5;

#[derive(Clone)]
pub struct AdminDashboardService {
    news: Arc<NewsService>,
}

impl AdminDashboardService {
    pub fn new(news: Arc<NewsService>) -> Self {
        Self { news }
    }

    pub async fn overview(&self) -> Result<AdminDashboardView, HttpError> {
        let (counts, recent) =
            tokio::try_join!(self.news.status_counts(), self.news.latest(RECENT_LIMIT))?;

        let metric = |label: &str, value: u64, href: &str| AdminMetricView {
            label: label.to_string(),
            value,
            href: href.to_string(),
        };

        Ok(AdminDashboardView {
            title: "Dashboard".to_string(),
            metrics: vec![
                metric("Total", counts.total, "/news"),
                metric("Published", counts.published, "/news?status=published"),
                metric("Draft", counts.draft, "/news?status=draft"),
                metric("Archived", counts.archived, "/news?status=archived"),
            ],
            recent: recent.iter().map(row_view).collect(),
            empty_message: "No news items have been created yet.".to_string(),
        })
    }
}
