//! Isolated in-memory database for tests

use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::connection::DatabaseConnection;
use crate::migrations::Migrator;
use crate::repositories::SeaOrmRepositoryFactory;

/// Test database backed by in-memory SQLite with migrations applied
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Create a fresh in-memory database.
    ///
    /// The pool is pinned to a single connection: every pooled SQLite
    /// `:memory:` connection is its own empty database, so the pool must
    /// never grow past one.
    pub async fn new() -> Self {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(5))
            .sqlx_logging(false);

        let connection = Database::connect(opts)
            .await
            .expect("failed to open in-memory database");

        Migrator::up(&connection, None)
            .await
            .expect("failed to run migrations");

        Self {
            connection: DatabaseConnection::from_connection(connection),
        }
    }

    /// Build a repository factory over this database with a 24 h invite TTL
    pub fn factory(&self) -> SeaOrmRepositoryFactory {
        SeaOrmRepositoryFactory::new(self.connection.clone(), chrono::Duration::hours(24))
    }

    /// Build a repository factory with a custom invite TTL
    pub fn factory_with_invite_ttl(&self, ttl: chrono::Duration) -> SeaOrmRepositoryFactory {
        SeaOrmRepositoryFactory::new(self.connection.clone(), ttl)
    }
}
