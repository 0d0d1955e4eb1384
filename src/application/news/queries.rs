use crate::application::pagination::{MAX_PER_PAGE, OffsetPage};
use crate::application::query::{NewsListParams, NewsQuery};
use crate::domain::{entities::NewsRecord, types::NewsStatus};

use super::service::NewsService;
use super::types::{NewsError, NewsStatusCounts};

impl NewsService {
    pub fn query_from(&self, params: &NewsListParams) -> NewsQuery {
        NewsQuery::from_params(params, self.default_per_page)
    }

    pub async fn list(&self, query: &NewsQuery) -> Result<OffsetPage<NewsRecord>, NewsError> {
        self.reader.list_news(query).await.map_err(NewsError::from)
    }

    pub async fn find(&self, id: i64) -> Result<NewsRecord, NewsError> {
        self.reader
            .find_news(id)
            .await?
            .ok_or(NewsError::NotFound { id })
    }

    pub async fn status_counts(&self) -> Result<NewsStatusCounts, NewsError> {
        let (total, published, draft, archived) = tokio::try_join!(
            self.reader.count_news(None),
            self.reader.count_news(Some(NewsStatus::Published)),
            self.reader.count_news(Some(NewsStatus::Draft)),
            self.reader.count_news(Some(NewsStatus::Archived)),
        )?;

        Ok(NewsStatusCounts {
            total,
            published,
            draft,
            archived,
        })
    }

    pub async fn latest(&self, limit: u32) -> Result<Vec<NewsRecord>, NewsError> {
        self.reader.latest_news(limit).await.map_err(NewsError::from)
    }

    /// Every stored item in listing order.
    pub async fn all(&self) -> Result<Vec<NewsRecord>, NewsError> {
        let total = self.reader.count_news(None).await?;
        let mut items = Vec::with_capacity(usize::try_from(total).unwrap_or_default());
        let mut params = NewsListParams {
            per_page: Some(MAX_PER_PAGE.to_string()),
            ..Default::default()
        };

        let mut page = 1u32;
        loop {
            params.page = Some(page.to_string());
            let result = self.list(&self.query_from(&params)).await?;
            let done = !result.meta.has_next;
            items.extend(result.items);
            if done {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}
