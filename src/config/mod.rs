//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;
#[cfg(test)]
mod tests;

pub use cli::{CliArgs, Command, DatabaseOverride, ImportArgs, SeedArgs, ServeArgs, ServeOverrides};

use std::{fmt, net::SocketAddr, num::NonZeroU32, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::application::pagination::MAX_PER_PAGE;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "newsroom";
const ENV_PREFIX: &str = "NEWSROOM";
const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";
const MEMORY_DATABASE_SCHEME: &str = "memory://";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_ADMIN_HOST: &str = "127.0.0.1";
const DEFAULT_API_PORT: u16 = 5000;
const DEFAULT_ADMIN_PORT: u16 = 5001;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_NEWS_PER_PAGE: u32 = 10;
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5500",
    "http://127.0.0.1:5500",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub news: NewsSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub environment: AppEnvironment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
    Testing,
}

impl AppEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppEnvironment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnvironment::Development),
            "production" | "prod" => Ok(AppEnvironment::Production),
            "testing" | "test" => Ok(AppEnvironment::Testing),
            other => Err(format!(
                "unknown environment `{other}`, expected development, production or testing"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub api_addr: SocketAddr,
    pub admin_addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres { url: String },
    Memory,
    Unconfigured,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub backend: DatabaseBackend,
    pub max_connections: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct NewsSettings {
    pub per_page: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors.allowed_origins"),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    if raw.database.url.is_none() {
        raw.database.url = std::env::var(FALLBACK_DATABASE_URL_VAR).ok();
    }

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::Import(args)) => raw.apply_database_override(&args.database),
        Some(Command::Seed(args)) => raw.apply_database_override(&args.database),
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    app: RawAppSettings,
    server: RawServerSettings,
    logging: RawLoggingSettings,
    database: RawDatabaseSettings,
    news: RawNewsSettings,
    cors: RawCorsSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(environment) = overrides.environment.as_ref() {
            self.app.environment = Some(environment.clone());
        }
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(host) = overrides.server_admin_host.as_ref() {
            self.server.admin_host = Some(host.clone());
        }
        if let Some(port) = overrides.api_port {
            self.server.api_port = Some(port);
        }
        if let Some(port) = overrides.admin_port {
            self.server.admin_port = Some(port);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(url) = overrides.database_url.as_ref() {
            self.database.url = Some(url.clone());
        }
        if let Some(max) = overrides.database_max_connections {
            self.database.max_connections = Some(max);
        }
        if let Some(per_page) = overrides.news_per_page {
            self.news.per_page = Some(per_page);
        }
        if !overrides.cors_allowed_origins.is_empty() {
            self.cors.allowed_origins = Some(overrides.cors_allowed_origins.clone());
        }
    }

    fn apply_database_override(&mut self, overrides: &DatabaseOverride) {
        if let Some(url) = overrides.database_url.as_ref() {
            self.database.url = Some(url.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            app,
            server,
            logging,
            database,
            news,
            cors,
        } = raw;

        let app = build_app_settings(app)?;
        let server = build_server_settings(server)?;
        let logging = build_logging_settings(logging)?;
        let database = build_database_settings(database, app.environment)?;
        let news = build_news_settings(news)?;
        let cors = build_cors_settings(cors)?;

        Ok(Self {
            app,
            server,
            logging,
            database,
            news,
            cors,
        })
    }
}

fn build_app_settings(app: RawAppSettings) -> Result<AppSettings, LoadError> {
    let environment = match app.environment {
        Some(value) => AppEnvironment::from_str(&value)
            .map_err(|reason| LoadError::invalid("app.environment", reason))?,
        None => AppEnvironment::default(),
    };
    Ok(AppSettings { environment })
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let admin_host = server
        .admin_host
        .unwrap_or_else(|| DEFAULT_ADMIN_HOST.to_string());

    let api_port = server.api_port.unwrap_or(DEFAULT_API_PORT);
    if api_port == 0 {
        return Err(LoadError::invalid(
            "server.api_port",
            "port must be greater than zero",
        ));
    }

    let admin_port = server.admin_port.unwrap_or(DEFAULT_ADMIN_PORT);
    if admin_port == 0 {
        return Err(LoadError::invalid(
            "server.admin_port",
            "port must be greater than zero",
        ));
    }

    let api_addr = parse_socket_addr(&host, api_port)
        .map_err(|reason| LoadError::invalid("server.api_addr", reason))?;
    let admin_addr = parse_socket_addr(&admin_host, admin_port)
        .map_err(|reason| LoadError::invalid("server.admin_addr", reason))?;

    if api_addr == admin_addr {
        return Err(LoadError::invalid(
            "server.admin_port",
            "API and admin listeners must not share an address",
        ));
    }

    Ok(ServerSettings {
        api_addr,
        admin_addr,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_database_settings(
    database: RawDatabaseSettings,
    environment: AppEnvironment,
) -> Result<DatabaseSettings, LoadError> {
    let url = database.url.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let backend = match url {
        Some(url) if url.starts_with(MEMORY_DATABASE_SCHEME) || url == "memory" => {
            DatabaseBackend::Memory
        }
        Some(url) => DatabaseBackend::Postgres { url },
        None if environment == AppEnvironment::Testing => DatabaseBackend::Memory,
        None => DatabaseBackend::Unconfigured,
    };

    let max_value = database
        .max_connections
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
    let max_connections = non_zero_u32(max_value.into(), "database.max_connections")?;

    Ok(DatabaseSettings {
        backend,
        max_connections,
    })
}

fn build_news_settings(news: RawNewsSettings) -> Result<NewsSettings, LoadError> {
    let per_page_value = news.per_page.unwrap_or(DEFAULT_NEWS_PER_PAGE);
    let per_page = non_zero_u32(per_page_value.into(), "news.per_page")?;
    if per_page.get() > MAX_PER_PAGE {
        return Err(LoadError::invalid(
            "news.per_page",
            format!("must not exceed {MAX_PER_PAGE}"),
        ));
    }
    Ok(NewsSettings { per_page })
}

fn build_cors_settings(cors: RawCorsSettings) -> Result<CorsSettings, LoadError> {
    let allowed_origins = match cors.allowed_origins {
        Some(origins) => origins
            .into_iter()
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect::<Vec<_>>(),
        None => DEFAULT_CORS_ORIGINS
            .iter()
            .map(|origin| (*origin).to_string())
            .collect(),
    };

    for origin in &allowed_origins {
        if origin != "*" && !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(LoadError::invalid(
                "cors.allowed_origins",
                format!("origin `{origin}` must start with http:// or https://"),
            ));
        }
    }

    Ok(CorsSettings { allowed_origins })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAppSettings {
    environment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    admin_host: Option<String>,
    api_port: Option<u16>,
    admin_port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDatabaseSettings {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawNewsSettings {
    per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCorsSettings {
    allowed_origins: Option<Vec<String>>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn non_zero_u32(value: u64, key: &'static str) -> Result<NonZeroU32, LoadError> {
    if value == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    let value_u32: u32 = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "value exceeds supported range for u32"))?;
    NonZeroU32::new(value_u32).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

/// Settings suitable for tests and embedded use: defaults with the in-process store.
pub fn testing_settings() -> Result<Settings, LoadError> {
    let raw = RawSettings {
        app: RawAppSettings {
            environment: Some(AppEnvironment::Testing.as_str().to_string()),
        },
        ..Default::default()
    };
    Settings::from_raw(raw)
}
