//! Request and response models for the REST API

pub mod activities;
pub mod common;
pub mod extranet;
pub mod fonctions;
pub mod rooms;

pub use activities::CreateActivityRequest;
pub use common::{DeleteRequest, HealthCheck, HealthCheckStatus, HealthResponse};
pub use extranet::{CreateInviteRequest, SetPasswordRequest, SetPasswordResponse};
pub use fonctions::FonctionRequest;
pub use rooms::RoomRequest;
