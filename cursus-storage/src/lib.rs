//! Storage layer for Cursus
//!
//! SeaORM entities, migrations and the tenant-scoped repository
//! implementations behind the `cursus-interfaces` traits. Every query and
//! mutation folds the caller's organization id into the WHERE clause.

pub mod connection;
pub mod entities;
pub mod errors;
pub mod filters;
pub mod migrations;
pub mod repositories;

#[cfg(feature = "testing")]
pub mod testing;

pub use connection::{ConnectionError, DatabaseConnection};
pub use migrations::Migrator;
pub use repositories::SeaOrmRepositoryFactory;
