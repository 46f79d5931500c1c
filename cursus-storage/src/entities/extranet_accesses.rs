//! Extranet access entity
//!
//! Lifecycle: created on invite with a single-use token and expiry;
//! `invite`/`en_attente` transition to `actif` on first successful
//! password set, which also clears the token.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_query::StringLen;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extranet_accesses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub email: String,
    pub display_name: Option<String>,
    pub role: AccessRole,
    pub statut: AccessStatut,
    /// Single-use invite token; cleared on consumption
    #[sea_orm(unique)]
    pub invite_token: Option<String>,
    /// Token validity deadline
    pub invite_token_expires_at: Option<DateTime<Utc>>,
    /// When the access became active
    pub activated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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

/// Stored extranet role
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccessRole {
    #[sea_orm(string_value = "formateur")]
    Formateur,
    #[sea_orm(string_value = "apprenant")]
    Apprenant,
    #[sea_orm(string_value = "contact_client")]
    ContactClient,
}

/// Stored access status
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccessStatut {
    #[sea_orm(string_value = "actif")]
    Actif,
    #[sea_orm(string_value = "invite")]
    Invite,
    #[sea_orm(string_value = "en_attente")]
    EnAttente,
}

impl From<AccessRole> for cursus_api_types::ExtranetRole {
    fn from(role: AccessRole) -> Self {
        match role {
            AccessRole::Formateur => cursus_api_types::ExtranetRole::Formateur,
            AccessRole::Apprenant => cursus_api_types::ExtranetRole::Apprenant,
            AccessRole::ContactClient => cursus_api_types::ExtranetRole::ContactClient,
        }
    }
}

impl From<cursus_api_types::ExtranetRole> for AccessRole {
    fn from(role: cursus_api_types::ExtranetRole) -> Self {
        match role {
            cursus_api_types::ExtranetRole::Formateur => AccessRole::Formateur,
            cursus_api_types::ExtranetRole::Apprenant => AccessRole::Apprenant,
            cursus_api_types::ExtranetRole::ContactClient => AccessRole::ContactClient,
        }
    }
}

impl From<AccessStatut> for cursus_api_types::AccessStatus {
    fn from(statut: AccessStatut) -> Self {
        match statut {
            AccessStatut::Actif => cursus_api_types::AccessStatus::Actif,
            AccessStatut::Invite => cursus_api_types::AccessStatus::Invite,
            AccessStatut::EnAttente => cursus_api_types::AccessStatus::EnAttente,
        }
    }
}
