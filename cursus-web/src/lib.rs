//! Reusable web middleware and utilities for the Cursus APIs
//!
//! Query/pagination extractors, the session-token auth extractor, the
//! HTTP error type and the standard response envelope live here so every
//! handler crate agrees on the wire contract.

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod utils;

pub use errors::{WebError, WebResult};
pub use extractors::auth::{AuthContext, SessionClaims, SessionVerifier};
pub use extractors::query::{ListQuery, QueryParams};
pub use middleware::{cors_layer, request_id_layer};
pub use utils::response::{created, no_content, ok, ApiResponse, ResponseMeta};
