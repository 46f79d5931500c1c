//! REST API for the Cursus back-office and extranet
//!
//! Handlers are grouped per resource and depend only on the
//! `cursus-interfaces` traits, injected through [`context::AppContext`].

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod mailer;
pub mod models;

pub use app::{create_rest_app, AppConfig};
pub use context::AppContext;
pub use errors::{RestError, RestResult};
