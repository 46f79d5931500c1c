//! Database repository interfaces
//!
//! Every method is tenant-scoped: the caller passes the resolved
//! `organization_id` explicitly and the implementation folds it into the
//! WHERE clause, so a caller can never reach another tenant's rows even
//! with a guessed id. The invite-token lookups are the one exception -
//! a token arrives before any tenant is known.

use async_trait::async_trait;
use chrono::NaiveDate;
use cursus_api_types::{
    enums::{AccessStatus, ActivityAction, ActivityModule, ActivityOrigin, ExtranetRole},
    pagination::ListInput,
    ListResponse, UnifiedActivity, UnifiedExtranetAccess, UnifiedFonction, UnifiedOrganization,
    UnifiedRoom, UnifiedUser,
};
use serde::{Deserialize, Serialize};

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("{entity} '{id}' introuvable")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{message}")]
    Constraint { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DatabaseError::Internal {
            message: message.into(),
        }
    }
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check that the repository can serve requests
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

// =============================================================================
// Activity Repository
// =============================================================================

/// Input for recording an activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
    pub module: ActivityModule,
    pub action: ActivityAction,
    pub entite_type: Option<String>,
    pub entite_id: Option<String>,
    pub description: String,
    pub actor_name: Option<String>,
    pub actor_role: Option<String>,
    pub origin: ActivityOrigin,
    pub metadata: serde_json::Value,
}

/// Filter criteria for activity queries
///
/// `entite_type`/`entite_id` only filter together; handlers reject a
/// half-supplied pair before it reaches the repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityFilters {
    pub module: Option<ActivityModule>,
    pub action: Option<ActivityAction>,
    pub origin: Option<ActivityOrigin>,
    pub entite_type: Option<String>,
    pub entite_id: Option<String>,
    pub actor_role: Option<String>,
    /// Case-insensitive substring match on the description
    pub search: Option<String>,
    /// Inclusive lower bound (start of day)
    pub date_debut: Option<NaiveDate>,
    /// Inclusive upper bound (end of day, millisecond precision)
    pub date_fin: Option<NaiveDate>,
}

/// Activity repository interface. Activities are immutable once created.
#[async_trait]
pub trait ActivityRepository: Repository {
    /// Record an activity for the given tenant
    async fn create(
        &self,
        organization_id: i32,
        activity: NewActivity,
    ) -> Result<UnifiedActivity, DatabaseError>;

    /// List activities with filters, newest first
    async fn find_with_list_input(
        &self,
        organization_id: i32,
        filters: ActivityFilters,
        list_input: ListInput,
    ) -> Result<ListResponse<UnifiedActivity>, DatabaseError>;

    /// Count all activities for the tenant
    async fn count(&self, organization_id: i32) -> Result<u64, DatabaseError>;
}

// =============================================================================
// Room Repository
// =============================================================================

/// Input for creating a room; also the full-replace update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoom {
    pub name: String,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Full-replace update payload for a room
pub type RoomChanges = NewRoom;

/// Filter criteria for room queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFilters {
    pub name_contains: Option<String>,
    pub actif: Option<bool>,
}

/// Room repository interface. Rooms are soft-deleted (the `actif` flag)
/// because sessions keep historical references to them.
#[async_trait]
pub trait RoomRepository: Repository {
    async fn create(&self, organization_id: i32, room: NewRoom) -> Result<UnifiedRoom, DatabaseError>;

    async fn update(
        &self,
        organization_id: i32,
        id: i32,
        changes: RoomChanges,
    ) -> Result<UnifiedRoom, DatabaseError>;

    async fn find_by_id(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<UnifiedRoom>, DatabaseError>;

    async fn find_with_list_input(
        &self,
        organization_id: i32,
        filters: RoomFilters,
        list_input: ListInput,
    ) -> Result<ListResponse<UnifiedRoom>, DatabaseError>;

    /// Soft-delete: flip `actif` off for every given id under the tenant.
    /// Returns the number of rows touched.
    async fn deactivate(&self, organization_id: i32, ids: &[i32]) -> Result<u64, DatabaseError>;
}

// =============================================================================
// Fonction Repository
// =============================================================================

/// Input for creating a fonction; `position` is appended at the end when absent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFonction {
    pub name: String,
    pub position: Option<i32>,
}

/// Full-replace update payload for a fonction
pub type FonctionChanges = NewFonction;

/// Filter criteria for fonction queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FonctionFilters {
    pub name_contains: Option<String>,
}

/// Fonction repository interface; listings are ordered by `position`
#[async_trait]
pub trait FonctionRepository: Repository {
    async fn create(
        &self,
        organization_id: i32,
        fonction: NewFonction,
    ) -> Result<UnifiedFonction, DatabaseError>;

    async fn update(
        &self,
        organization_id: i32,
        id: i32,
        changes: FonctionChanges,
    ) -> Result<UnifiedFonction, DatabaseError>;

    async fn find_by_id(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<UnifiedFonction>, DatabaseError>;

    async fn find_with_list_input(
        &self,
        organization_id: i32,
        filters: FonctionFilters,
        list_input: ListInput,
    ) -> Result<ListResponse<UnifiedFonction>, DatabaseError>;

    /// Hard delete; returns the number of rows removed
    async fn delete(&self, organization_id: i32, ids: &[i32]) -> Result<u64, DatabaseError>;
}

// =============================================================================
// Extranet Access Repository
// =============================================================================

/// Input for inviting someone to the extranet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExtranetAccess {
    pub email: String,
    pub display_name: Option<String>,
    pub role: ExtranetRole,
}

/// Filter criteria for extranet access queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtranetAccessFilters {
    pub role: Option<ExtranetRole>,
    pub statut: Option<AccessStatus>,
    pub email_contains: Option<String>,
}

/// Extranet access repository interface
#[async_trait]
pub trait ExtranetAccessRepository: Repository {
    /// Create an access in `invite` status with a fresh single-use token.
    /// Returns the access and the raw token (the only time it is exposed).
    async fn create_invite(
        &self,
        organization_id: i32,
        access: NewExtranetAccess,
    ) -> Result<(UnifiedExtranetAccess, String), DatabaseError>;

    async fn find_by_id(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<UnifiedExtranetAccess>, DatabaseError>;

    async fn find_with_list_input(
        &self,
        organization_id: i32,
        filters: ExtranetAccessFilters,
        list_input: ListInput,
    ) -> Result<ListResponse<UnifiedExtranetAccess>, DatabaseError>;

    /// Look up an access by its invite token. Tenant-independent: the token
    /// arrives on the redirect URL before any session exists. Expiry is NOT
    /// checked here; callers decide how to surface it.
    async fn find_by_invite_token(
        &self,
        token: &str,
    ) -> Result<Option<UnifiedExtranetAccess>, DatabaseError>;

    /// Look up an access by email across tenants. Used by the auth
    /// callback, where the provider hands back an identity before any
    /// tenant is known.
    async fn find_by_email_any(
        &self,
        email: &str,
    ) -> Result<Option<UnifiedExtranetAccess>, DatabaseError>;

    /// Consume a valid token: set status to `actif`, stamp `activated_at`
    /// and clear the token in one update. Fails NotFound when the token is
    /// unknown, already consumed, or past its expiry.
    async fn activate_with_token(
        &self,
        token: &str,
    ) -> Result<UnifiedExtranetAccess, DatabaseError>;
}

// =============================================================================
// User and Organization Repositories
// =============================================================================

/// Back-office user repository interface
#[async_trait]
pub trait UserRepository: Repository {
    /// Resolve a user's organization membership and role
    async fn find_membership(&self, user_id: i32) -> Result<Option<UnifiedUser>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UnifiedUser>, DatabaseError>;

    /// Stamp the last-login timestamp; best effort
    async fn touch_last_login(&self, user_id: i32) -> Result<(), DatabaseError>;
}

/// Organization repository interface
#[async_trait]
pub trait OrganizationRepository: Repository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedOrganization>, DatabaseError>;

    async fn find_by_slug(&self, slug: &str)
        -> Result<Option<UnifiedOrganization>, DatabaseError>;
}

/// Factory providing access to all repositories
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn activity_repository(&self) -> &dyn ActivityRepository;
    fn room_repository(&self) -> &dyn RoomRepository;
    fn fonction_repository(&self) -> &dyn FonctionRepository;
    fn extranet_access_repository(&self) -> &dyn ExtranetAccessRepository;
    fn user_repository(&self) -> &dyn UserRepository;
    fn organization_repository(&self) -> &dyn OrganizationRepository;

    /// Check the underlying connection
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
