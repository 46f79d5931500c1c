//! Activity entity - the tenant-scoped audit trail
//!
//! Rows are written as a side effect of every mutating action and are
//! immutable once created. `module`, `action` and `origin` are stored as
//! plain strings because every feature module writes its own values; the
//! row mapper narrows them to the closed enums lossily.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub module: String,
    pub action: String,
    pub entite_type: Option<String>,
    pub entite_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub actor_name: Option<String>,
    pub actor_role: Option<String>,
    pub origin: String,
    pub metadata: Json,
    pub created_at: DateTime<Utc>,
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
