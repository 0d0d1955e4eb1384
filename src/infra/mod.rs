//! Infrastructure adapters and runtime bootstrap.

pub mod db;
pub mod error;
pub mod http;
pub mod memory;
pub mod telemetry;

use std::sync::Arc;

use tracing::info;

use crate::application::news::NewsService;
use crate::application::repos::{HealthRepo, NewsRepo, NewsWriteRepo};
use crate::config::{DatabaseBackend, DatabaseSettings};

use self::db::PostgresRepositories;
use self::error::InfraError;
use self::memory::InMemoryRepositories;

/// Repository handles for the selected storage backend.
#[derive(Clone)]
pub struct NewsStore {
    pub reader: Arc<dyn NewsRepo>,
    pub writer: Arc<dyn NewsWriteRepo>,
    pub health: Arc<dyn HealthRepo>,
    pub backend: &'static str,
}

impl NewsStore {
    pub fn memory() -> Self {
        let repo = Arc::new(InMemoryRepositories::new());
        Self {
            reader: repo.clone(),
            writer: repo.clone(),
            health: repo,
            backend: "memory",
        }
    }

    pub fn postgres(repositories: PostgresRepositories) -> Self {
        let repo = Arc::new(repositories);
        Self {
            reader: repo.clone(),
            writer: repo.clone(),
            health: repo,
            backend: "postgres",
        }
    }

    /// Connect to the configured backend, applying migrations for Postgres.
    pub async fn open(settings: &DatabaseSettings) -> Result<Self, InfraError> {
        match &settings.backend {
            DatabaseBackend::Postgres { url } => {
                let pool = PostgresRepositories::connect(url, settings.max_connections.get())
                    .await
                    .map_err(|source| InfraError::Connect {
                        backend: "postgres",
                        source,
                    })?;
                PostgresRepositories::run_migrations(&pool)
                    .await
                    .map_err(InfraError::Migrate)?;
                info!(
                    target = "newsroom::infra::store",
                    max_connections = settings.max_connections.get(),
                    "connected to postgres and applied migrations"
                );
                Ok(Self::postgres(PostgresRepositories::new(pool)))
            }
            DatabaseBackend::Memory => {
                info!(
                    target = "newsroom::infra::store",
                    "using the in-memory news store"
                );
                Ok(Self::memory())
            }
            DatabaseBackend::Unconfigured => Err(InfraError::StoreUnconfigured),
        }
    }

    pub fn news_service(&self, default_per_page: u32) -> NewsService {
        NewsService::new(self.reader.clone(), self.writer.clone(), default_per_page)
    }
}
