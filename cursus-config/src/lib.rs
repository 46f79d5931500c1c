//! Configuration for the Cursus service
//!
//! Split by domain the way the service is wired: server, database, cache,
//! logging, mail and uploads. Files are YAML; every value has a default
//! and can be overridden through `CURSUS_*` environment variables.

pub mod domains;
pub mod error;
pub mod loader;
pub mod validation;

pub use domains::CursusConfig;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;
