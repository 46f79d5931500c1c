//! Extranet access request models

use cursus_api_types::ExtranetRole;
use serde::{Deserialize, Serialize};

/// Body for inviting someone to the extranet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInviteRequest {
    pub email: String,
    pub nom: Option<String>,
    pub role: ExtranetRole,
}

/// Body for the first password set, consuming the invite token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Response to a successful password set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPasswordResponse {
    /// Role-specific landing route the client should navigate to
    pub redirect_to: String,
}
