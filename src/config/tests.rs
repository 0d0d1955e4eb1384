use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.api_port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        api_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.api_addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn defaults_follow_the_deployment_layout() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.api_addr.port(), DEFAULT_API_PORT);
    assert_eq!(settings.server.admin_addr.port(), DEFAULT_ADMIN_PORT);
    assert_eq!(settings.news.per_page.get(), 10);
    assert_eq!(settings.app.environment, AppEnvironment::Development);
    assert_eq!(settings.database.backend, DatabaseBackend::Unconfigured);
    assert_eq!(settings.cors.allowed_origins.len(), DEFAULT_CORS_ORIGINS.len());
}

#[test]
fn testing_environment_defaults_to_memory_store() {
    let settings = testing_settings().expect("valid settings");
    assert_eq!(settings.database.backend, DatabaseBackend::Memory);
}

#[test]
fn database_url_selects_backend() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("  postgres://news@localhost/news  ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(
        settings.database.backend,
        DatabaseBackend::Postgres {
            url: "postgres://news@localhost/news".to_string()
        }
    );

    let mut raw = RawSettings::default();
    raw.database.url = Some("memory://".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.database.backend, DatabaseBackend::Memory);
}

#[test]
fn per_page_must_fit_listing_bounds() {
    let mut raw = RawSettings::default();
    raw.news.per_page = Some(0);
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "news.per_page",
            ..
        })
    ));

    let mut raw = RawSettings::default();
    raw.news.per_page = Some(101);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn unknown_environment_is_rejected() {
    let mut raw = RawSettings::default();
    raw.app.environment = Some("staging".to_string());
    let err = Settings::from_raw(raw).expect_err("staging is unknown");
    assert!(err.to_string().contains("app.environment"));
}

#[test]
fn listeners_must_not_collide() {
    let mut raw = RawSettings::default();
    raw.server.api_port = Some(6000);
    raw.server.admin_port = Some(6000);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn cors_origins_are_normalized_and_validated() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        cors_allowed_origins: vec!["https://news.example.com/".to_string()],
        ..Default::default()
    };
    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(
        settings.cors.allowed_origins,
        vec!["https://news.example.com".to_string()]
    );

    let mut raw = RawSettings::default();
    raw.cors.allowed_origins = Some(vec!["news.example.com".to_string()]);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["newsroom"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_import_arguments() {
    let args = CliArgs::parse_from([
        "newsroom",
        "import",
        "--database-url",
        "postgres://example",
        "--seed-if-missing",
        "/tmp/news.json",
    ]);

    match args.command.expect("import command") {
        Command::Import(import) => {
            assert_eq!(
                import.database.database_url.as_deref(),
                Some("postgres://example")
            );
            assert!(import.seed_if_missing);
            assert_eq!(import.file, std::path::Path::new("/tmp/news.json"));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_seed_arguments() {
    let args = CliArgs::parse_from(["newsroom", "seed", "--database-url", "memory://"]);

    match args.command.expect("seed command") {
        Command::Seed(seed) => {
            assert_eq!(seed.database.database_url.as_deref(), Some("memory://"));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "newsroom",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--database-url",
        "postgres://override",
        "--cors-allowed-origin",
        "https://a.example",
        "--cors-allowed-origin",
        "https://b.example",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(
                serve.overrides.database_url.as_deref(),
                Some("postgres://override")
            );
            assert_eq!(serve.overrides.cors_allowed_origins.len(), 2);
        }
        _ => panic!("wrong command parsed"),
    }
}
