//! Unified API types for the Cursus back-office and extranet APIs
//!
//! This crate provides consistent type definitions shared by the REST
//! handlers and the repository layer, so both sides agree on pagination,
//! error shapes and the public form of every entity.

pub mod domain;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod pagination;

// Re-export main types for convenience
pub use domain::{
    UnifiedActivity, UnifiedExtranetAccess, UnifiedFonction, UnifiedOrganization, UnifiedRoom,
    UnifiedUser,
};
pub use enums::{AccessStatus, ActivityAction, ActivityModule, ActivityOrigin, ExtranetRole, UserRole};
pub use errors::{ApiError, FieldErrors, FORM_ERROR_KEY};
pub use ids::ApiId;
pub use pagination::{ListInput, ListResponse, PaginationInput, PaginationMeta};
