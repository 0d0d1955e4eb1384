use std::sync::Arc;

use crate::application::news::NewsService;
use crate::application::repos::HealthRepo;
use crate::config::AppEnvironment;

#[derive(Clone)]
pub struct ApiState {
    pub news: Arc<NewsService>,
    pub health: Arc<dyn HealthRepo>,
    pub environment: AppEnvironment,
}
