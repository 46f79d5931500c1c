//! Public shapes of the domain entities, as consumed by API callers
//!
//! These are the row-mapper targets: storage columns are renamed and
//! narrowed here, and missing optionals default to `None`. Raw entity
//! models never cross the handler boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{
    AccessStatus, ActivityAction, ActivityModule, ActivityOrigin, ExtranetRole, UserRole,
};
use crate::ids::ApiId;

/// An organization (tenant). Every business record belongs to exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedOrganization {
    pub id: ApiId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A back-office user with their organization membership and role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedUser {
    pub id: ApiId,
    pub organization_id: ApiId,
    pub email: String,
    pub display_name: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// An extranet access record (trainer, learner or client contact)
///
/// The invite token itself is never exposed here; issuance returns it
/// separately so it only travels through the invitation email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedExtranetAccess {
    pub id: ApiId,
    pub organization_id: ApiId,
    pub email: String,
    pub display_name: Option<String>,
    pub role: ExtranetRole,
    pub statut: AccessStatus,
    pub invite_expires_at: Option<DateTime<Utc>>,
    pub activated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An audit-trail activity record; immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedActivity {
    pub id: ApiId,
    pub organization_id: ApiId,
    pub module: ActivityModule,
    pub action: ActivityAction,
    pub entite_type: Option<String>,
    pub entite_id: Option<String>,
    pub description: String,
    pub actor_name: Option<String>,
    pub actor_role: Option<String>,
    pub origin: ActivityOrigin,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A training room ("salle"); soft-deletable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedRoom {
    pub id: ApiId,
    pub organization_id: ApiId,
    pub name: String,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub actif: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job function ("fonction") with an explicit display position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedFonction {
    pub id: ApiId,
    pub organization_id: ApiId,
    pub name: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
