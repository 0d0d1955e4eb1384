use std::{net::SocketAddr, process, sync::Arc};

use newsroom::{
    application::{
        admin::{chrome::AdminChromeService, dashboard::AdminDashboardService},
        error::AppError,
        import,
        news::{ImportReport, NewsService},
    },
    config,
    infra::{
        NewsStore,
        error::InfraError,
        http::{self, AdminState, ApiState},
        telemetry,
    },
};
use tokio::{net::TcpListener, try_join};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

const BRAND_TITLE: &str = "Newsroom";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Import(args) => run_import(settings, args).await,
        config::Command::Seed(_) => run_seed(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let store = NewsStore::open(&settings.database).await?;
    let news = Arc::new(store.news_service(settings.news.per_page.get()));
    let environment = settings.app.environment;

    let api_state = ApiState {
        news: news.clone(),
        health: store.health.clone(),
        environment,
    };
    let admin_state = AdminState {
        news: news.clone(),
        health: store.health.clone(),
        chrome: Arc::new(AdminChromeService::new(BRAND_TITLE, environment.as_str())),
        dashboard: Arc::new(AdminDashboardService::new(news)),
    };

    serve_http(&settings, api_state, admin_state).await
}

async fn run_import(settings: config::Settings, args: config::ImportArgs) -> Result<(), AppError> {
    let service = open_service(&settings).await?;

    info!(
        target = "newsroom::import",
        path = %args.file.display(),
        seed_if_missing = args.seed_if_missing,
        "Starting import"
    );

    let report = import::import_file(&service, &args.file, args.seed_if_missing).await?;
    summarize(&report);
    Ok(())
}

async fn run_seed(settings: config::Settings) -> Result<(), AppError> {
    let service = open_service(&settings).await?;
    let report = import::seed_samples(&service).await?;
    summarize(&report);
    Ok(())
}

async fn open_service(settings: &config::Settings) -> Result<NewsService, AppError> {
    let store = NewsStore::open(&settings.database).await?;
    Ok(store.news_service(settings.news.per_page.get()))
}

fn summarize(report: &ImportReport) {
    if let Some(existing) = report.existing {
        info!(
            target = "newsroom::import",
            existing, "Import completed without changes"
        );
        return;
    }
    for skipped in &report.skipped {
        warn!(
            target = "newsroom::import",
            index = skipped.index,
            reason = %skipped.reason,
            "Item was not imported"
        );
    }
    info!(
        target = "newsroom::import",
        inserted = report.inserted,
        skipped = report.skipped.len(),
        "Import completed"
    );
}

async fn serve_http(
    settings: &config::Settings,
    api_state: ApiState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let api_router = http::build_api_router(api_state, &settings.cors)?;
    let admin_router = http::build_admin_router(admin_state);

    let api_listener = bind("api", settings.server.api_addr).await?;
    let admin_listener = bind("admin", settings.server.admin_addr).await?;

    info!(
        target = "newsroom::serve",
        api = %settings.server.api_addr,
        admin = %settings.server.admin_addr,
        environment = %settings.app.environment,
        "listening"
    );

    let api_server = async {
        axum::serve(api_listener, api_router.into_make_service())
            .await
            .map_err(|source| InfraError::Serve {
                surface: "api",
                source,
            })
    };
    let admin_server = async {
        axum::serve(admin_listener, admin_router.into_make_service())
            .await
            .map_err(|source| InfraError::Serve {
                surface: "admin",
                source,
            })
    };

    try_join!(api_server, admin_server)?;
    Ok(())
}

async fn bind(surface: &'static str, addr: SocketAddr) -> Result<TcpListener, InfraError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| InfraError::Bind {
            surface,
            addr,
            source,
        })
}
