//! Input validation and user-facing error sanitization

pub mod error_sanitization;
pub mod input;
