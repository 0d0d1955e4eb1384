use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the newsroom binary.
#[derive(Debug, Parser)]
#[command(
    name = "newsroom",
    version,
    about = "News and announcements API with an admin console"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "NEWSROOM_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the JSON API and the admin console.
    Serve(Box<ServeArgs>),
    /// Import news items from a JSON array into an empty store.
    #[command(name = "import")]
    Import(ImportArgs),
    /// Insert the built-in sample news into an empty store.
    #[command(name = "seed")]
    Seed(SeedArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct DatabaseOverride {
    /// Override the database connection URL (`memory://` selects the in-process store).
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the deployment environment (development|production|testing).
    #[arg(long = "environment", value_name = "NAME")]
    pub environment: Option<String>,

    /// Override the API listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the admin listener host.
    #[arg(long = "server-admin-host", value_name = "HOST")]
    pub server_admin_host: Option<String>,

    /// Override the API listener port.
    #[arg(long = "server-api-port", value_name = "PORT")]
    pub api_port: Option<u16>,

    /// Override the admin listener port.
    #[arg(long = "server-admin-port", value_name = "PORT")]
    pub admin_port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,

    /// Override the database pool size.
    #[arg(long = "database-max-connections", value_name = "COUNT")]
    pub database_max_connections: Option<u32>,

    /// Override the default page size for listings.
    #[arg(long = "news-per-page", value_name = "COUNT")]
    pub news_per_page: Option<u32>,

    /// Replace the allowed CORS origins (repeatable).
    #[arg(long = "cors-allowed-origin", value_name = "ORIGIN")]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,

    /// Path to the JSON file holding `[{title, date, link}]` entries.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Seed the sample news when the file does not exist.
    #[arg(long = "seed-if-missing", action = clap::ArgAction::SetTrue)]
    pub seed_if_missing: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SeedArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,
}
