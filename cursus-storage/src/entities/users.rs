//! Back-office user entity
//!
//! A user belongs to exactly one organization; the role drives the static
//! capability table in `cursus-rbac`. Password and session state live with
//! the external auth provider, not here.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_query::StringLen;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// User role for RBAC
    pub role: UserRole,
    /// Whether the account is active
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// When the user last logged in
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrganizationId",
        to = "super::organizations::Column::Id"
    )]
    Organization,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Stored back-office role
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, Default)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "user")]
    #[default]
    User,
}

impl From<UserRole> for cursus_api_types::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => cursus_api_types::UserRole::Admin,
            UserRole::Manager => cursus_api_types::UserRole::Manager,
            UserRole::User => cursus_api_types::UserRole::User,
        }
    }
}

impl From<cursus_api_types::UserRole> for UserRole {
    fn from(role: cursus_api_types::UserRole) -> Self {
        match role {
            cursus_api_types::UserRole::Admin => UserRole::Admin,
            cursus_api_types::UserRole::Manager => UserRole::Manager,
            cursus_api_types::UserRole::User => UserRole::User,
        }
    }
}
