use std::sync::Arc;

use crate::application::admin::{chrome::AdminChromeService, dashboard::AdminDashboardService};
use crate::application::news::NewsService;
use crate::application::repos::HealthRepo;

#[derive(Clone)]
pub struct AdminState {
    pub news: Arc<NewsService>,
    pub health: Arc<dyn HealthRepo>,
    pub chrome: Arc<AdminChromeService>,
    pub dashboard: Arc<AdminDashboardService>,
}
