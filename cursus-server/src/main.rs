//! Cursus server binary
//!
//! Loads configuration, connects and migrates the database, wires the
//! repository factory and serves the REST API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cursus_config::domains::logging::LogFormat;
use cursus_config::{ConfigLoader, CursusConfig};
use cursus_interfaces::UnconfiguredAuthProvider;
use cursus_rest_api::mailer::{HttpMailer, LogMailer};
use cursus_rest_api::{create_rest_app, AppConfig, AppContext};
use cursus_storage::{DatabaseConnection, SeaOrmRepositoryFactory};
use cursus_web::SessionVerifier;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(config: &CursusConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", CursusConfig::generate_sample());
        return Ok(());
    }

    let config = ConfigLoader::new()
        .load(cli.config.as_ref())
        .context("failed to load configuration")?;

    init_tracing(&config);
    tracing::info!("Starting Cursus server");

    // Database: connect and apply pending migrations
    let db = DatabaseConnection::new(&config.database)
        .await
        .context("failed to connect to database")?;
    db.migrate().await.context("failed to run migrations")?;

    // Best-effort cache; unconfigured is a valid state
    if config.cache.enabled {
        cursus_caching::init_global(Arc::new(
            cursus_caching::InMemoryCache::<serde_json::Value>::new(),
        ));
    }

    let invite_ttl = chrono::Duration::from_std(config.server.auth.invite_token_ttl)
        .context("invalid invite token TTL")?;
    let repositories = Arc::new(SeaOrmRepositoryFactory::new(db, invite_ttl));

    let mail_configured = config.mail.is_some();
    let mailer: Arc<dyn cursus_interfaces::EmailService> = match config.mail.clone() {
        Some(mail_config) => Arc::new(HttpMailer::new(mail_config)),
        None => Arc::new(LogMailer),
    };
    let app_base_url = config
        .mail
        .as_ref()
        .map(|mail| mail.app_base_url.clone())
        .unwrap_or_else(|| format!("http://{}:{}", config.server.bind_address, config.server.port));

    let context = AppContext {
        repositories,
        mailer,
        auth_provider: Arc::new(UnconfiguredAuthProvider),
        verifier: SessionVerifier::new(&config.server.auth.session_secret),
        uploads: config.uploads.clone(),
        mail_configured,
        app_base_url,
    };

    let app_config = AppConfig {
        cors_origins: config.server.cors_origins.clone(),
        ..AppConfig::default()
    };
    let app = create_rest_app(context, app_config);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Cursus server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
