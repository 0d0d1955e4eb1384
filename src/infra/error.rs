use std::{io, net::SocketAddr};

use thiserror::Error;

/// Failures while bringing up the store, the listeners or the subscriber.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to bind the {surface} listener on {addr}: {source}")]
    Bind {
        surface: &'static str,
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("{surface} server stopped: {source}")]
    Serve {
        surface: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to connect to the {backend} news store: {source}")]
    Connect {
        backend: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to apply news migrations: {0}")]
    Migrate(#[source] sqlx::Error),
    #[error("no news store is configured (set NEWSROOM__DATABASE__URL or DATABASE_URL)")]
    StoreUnconfigured,
    #[error("invalid CORS origin `{origin}`: {reason}")]
    CorsOrigin { origin: String, reason: String },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
