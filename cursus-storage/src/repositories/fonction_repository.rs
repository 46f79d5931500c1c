//! Fonction repository - tenant-scoped CRUD with explicit ordering

use async_trait::async_trait;
use chrono::Utc;
use cursus_api_types::{pagination::ListInput, ApiId, ListResponse, UnifiedFonction};
use cursus_interfaces::{
    DatabaseError, FonctionChanges, FonctionFilters, FonctionRepository, NewFonction, Repository,
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

use crate::connection::DatabaseConnection;
use crate::entities::{fonctions, Fonction, FonctionActiveModel, Fonctions};
use crate::errors::{map_db_err, map_read_err};
use crate::filters::{sanitize_like, validation};

const DUPLICATE_NAME: &str = "Une fonction portant ce nom existe déjà";

/// SeaORM implementation of the fonction repository
#[derive(Clone)]
pub struct SeaOrmFonctionRepository {
    db: DatabaseConnection,
}

impl SeaOrmFonctionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(organization_id: i32) -> Select<Fonctions> {
        Fonctions::find().filter(fonctions::Column::OrganizationId.eq(organization_id))
    }

    /// Next position at the end of the tenant's list
    async fn next_position(&self, organization_id: i32) -> Result<i32, DatabaseError> {
        let last = Self::scoped(organization_id)
            .order_by_desc(fonctions::Column::Position)
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(last.map(|f| f.position + 1).unwrap_or(1))
    }
}

fn to_unified(model: Fonction) -> UnifiedFonction {
    UnifiedFonction {
        id: ApiId::from_i32(model.id),
        organization_id: ApiId::from_i32(model.organization_id),
        name: model.name,
        position: model.position,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl Repository for SeaOrmFonctionRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl FonctionRepository for SeaOrmFonctionRepository {
    async fn create(
        &self,
        organization_id: i32,
        fonction: NewFonction,
    ) -> Result<UnifiedFonction, DatabaseError> {
        let position = match fonction.position {
            Some(position) => position,
            None => self.next_position(organization_id).await?,
        };

        let now = Utc::now();
        let active_model = FonctionActiveModel {
            organization_id: Set(organization_id),
            name: Set(fonction.name),
            position: Set(position),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err(e, DUPLICATE_NAME))?;
        Ok(to_unified(model))
    }

    async fn update(
        &self,
        organization_id: i32,
        id: i32,
        changes: FonctionChanges,
    ) -> Result<UnifiedFonction, DatabaseError> {
        let existing = Self::scoped(organization_id)
            .filter(fonctions::Column::Id.eq(id))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?
            .ok_or_else(|| DatabaseError::not_found("Fonction", id))?;

        let current_position = existing.position;
        let mut active_model: FonctionActiveModel = existing.into();
        active_model.name = Set(changes.name);
        active_model.position = Set(changes.position.unwrap_or(current_position));
        active_model.updated_at = Set(Utc::now());

        let model = active_model
            .update(self.db.get_connection())
            .await
            .map_err(|e| map_db_err(e, DUPLICATE_NAME))?;
        Ok(to_unified(model))
    }

    async fn find_by_id(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<UnifiedFonction>, DatabaseError> {
        let model = Self::scoped(organization_id)
            .filter(fonctions::Column::Id.eq(id))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(model.map(to_unified))
    }

    async fn find_with_list_input(
        &self,
        organization_id: i32,
        filters: FonctionFilters,
        list_input: ListInput,
    ) -> Result<ListResponse<UnifiedFonction>, DatabaseError> {
        if let Some(ref name) = filters.name_contains {
            validation::validate_query_input(name)?;
        }

        let mut query = Self::scoped(organization_id);

        if let Some(name) = filters.name_contains.as_deref() {
            let pattern = format!("%{}%", sanitize_like(name).to_uppercase());
            query = query.filter(
                Expr::expr(Func::upper(Expr::col((Fonctions, fonctions::Column::Name))))
                    .like(pattern),
            );
        }

        let pagination = list_input.get_pagination();
        let (page, limit) = (pagination.get_page(), pagination.get_limit());

        let total = query
            .clone()
            .count(self.db.get_connection())
            .await
            .map_err(map_read_err)?;

        let rows = query
            .order_by_asc(fonctions::Column::Position)
            .offset(pagination.get_offset())
            .limit(u64::from(limit))
            .all(self.db.get_connection())
            .await
            .map_err(map_read_err)?;

        Ok(ListResponse::new(
            rows.into_iter().map(to_unified).collect(),
            page,
            limit,
            total,
        ))
    }

    async fn delete(&self, organization_id: i32, ids: &[i32]) -> Result<u64, DatabaseError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = Fonctions::delete_many()
            .filter(fonctions::Column::OrganizationId.eq(organization_id))
            .filter(fonctions::Column::Id.is_in(ids.to_vec()))
            .exec(self.db.get_connection())
            .await
            .map_err(map_read_err)?;

        Ok(result.rows_affected)
    }
}
