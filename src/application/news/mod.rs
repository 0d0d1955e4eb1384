mod commands;
pub mod projection;
mod queries;
mod service;
pub mod types;

pub use projection::{FullNewsView, NewsProjection, ProjectedNews, PublicNewsView};
pub use service::NewsService;
pub use types::{
    CreateNewsCommand, ImportReport, NewsError, NewsStatusCounts, SkippedImport,
    UpdateNewsCommand,
};
