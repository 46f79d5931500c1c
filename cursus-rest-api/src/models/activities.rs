//! Activity request models

use cursus_api_types::enums::{ActivityAction, ActivityModule};
use serde::{Deserialize, Serialize};

/// Body for recording an activity from the back office
///
/// `entite_type`/`entite_id` follow the empty-string-means-not-set
/// convention and must be supplied together when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    /// Free-text description ("contenu" in the UI)
    pub contenu: String,
    /// Feature module; defaults to the messaging module
    pub module: Option<ActivityModule>,
    /// Action kind; defaults to a creation event
    pub action: Option<ActivityAction>,
    pub entite_type: Option<String>,
    pub entite_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
