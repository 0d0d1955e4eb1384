use std::sync::Arc;

use crate::application::repos::{NewsRepo, NewsWriteRepo};

#[derive(Clone)]
pub struct NewsService {
    pub(crate) reader: Arc<dyn NewsRepo>,
    pub(crate) writer: Arc<dyn NewsWriteRepo>,
    pub(crate) default_per_page: u32,
}

impl NewsService {
    pub fn new(
        reader: Arc<dyn NewsRepo>,
        writer: Arc<dyn NewsWriteRepo>,
        default_per_page: u32,
    ) -> Self {
        Self {
            reader,
            writer,
            default_per_page,
        }
    }

    pub fn default_per_page(&self) -> u32 {
        self.default_per_page
    }
}
