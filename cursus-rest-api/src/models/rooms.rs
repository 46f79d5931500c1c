//! Room request models

use serde::{Deserialize, Serialize};

/// Body for creating or fully updating a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRequest {
    pub nom: String,
    pub capacite: Option<i32>,
    pub lieu: Option<String>,
    pub description: Option<String>,
}
