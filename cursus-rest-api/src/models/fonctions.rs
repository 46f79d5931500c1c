//! Fonction request models

use serde::{Deserialize, Serialize};

/// Body for creating or fully updating a fonction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FonctionRequest {
    pub nom: String,
    /// Display position; appended at the end when absent
    pub position: Option<i32>,
}
