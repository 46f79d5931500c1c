//! Core validation and sanitization for the Cursus service

pub mod validation;

pub use validation::error_sanitization::{ErrorSanitizer, SanitizedError};
pub use validation::input::{normalize_optional, InputValidator};
