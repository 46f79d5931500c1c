//! Database connection wrapper

use cursus_config::domains::database::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection as SeaConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::migrations::Migrator;

/// Connection-establishment errors
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Database connection wrapper with configuration
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: SeaConnection,
}

impl DatabaseConnection {
    /// Create a new database connection with configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self, ConnectionError> {
        info!("Connecting to database");

        Self::ensure_sqlite_file_exists(&config.url)?;

        let mut opts = ConnectOptions::new(&config.url);
        opts.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(config.connection_timeout)
            .acquire_timeout(config.connection_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true);

        let connection = Database::connect(opts).await?;

        debug!(
            "Database connection established with {} max connections",
            config.max_connections
        );

        Ok(Self { connection })
    }

    /// Wrap an already-established connection (used by the test helpers)
    pub fn from_connection(connection: SeaConnection) -> Self {
        Self { connection }
    }

    /// Access the underlying SeaORM connection
    pub fn get_connection(&self) -> &SeaConnection {
        &self.connection
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<(), ConnectionError> {
        Migrator::up(&self.connection, None).await?;
        Ok(())
    }

    /// Round-trip the connection to verify it is alive
    pub async fn ping(&self) -> Result<(), ConnectionError> {
        self.connection.ping().await?;
        Ok(())
    }

    /// Ensure the directory of a file-based SQLite database exists
    fn ensure_sqlite_file_exists(database_url: &str) -> Result<(), ConnectionError> {
        if database_url.starts_with("sqlite:") && !database_url.contains(":memory:") {
            let file_path = database_url
                .strip_prefix("sqlite://")
                .or_else(|| database_url.strip_prefix("sqlite:"))
                .ok_or_else(|| {
                    ConnectionError::Config(format!("Invalid SQLite URL format: {}", database_url))
                })?;

            let path = std::path::Path::new(file_path);
            if let Some(parent_dir) = path.parent() {
                if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                    info!("Creating database directory: {:?}", parent_dir);
                    std::fs::create_dir_all(parent_dir).map_err(|e| {
                        ConnectionError::Config(format!(
                            "Failed to create database directory {:?}: {}",
                            parent_dir, e
                        ))
                    })?;
                }
            }
        } else if database_url.contains(":memory:") {
            debug!("Using in-memory SQLite database");
        }
        Ok(())
    }
}
