//! Room repository - tenant-scoped CRUD with soft delete

use async_trait::async_trait;
use chrono::Utc;
use cursus_api_types::{
    pagination::{ListInput, SortDirection},
    ApiId, ListResponse, UnifiedRoom,
};
use cursus_interfaces::{DatabaseError, NewRoom, Repository, RoomChanges, RoomFilters, RoomRepository};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

use crate::connection::DatabaseConnection;
use crate::entities::{rooms, Room, RoomActiveModel, Rooms};
use crate::errors::{map_db_err, map_read_err};
use crate::filters::{sanitize_like, validation};

const DUPLICATE_NAME: &str = "Une salle portant ce nom existe déjà";

/// SeaORM implementation of the room repository
#[derive(Clone)]
pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(organization_id: i32) -> Select<Rooms> {
        Rooms::find().filter(rooms::Column::OrganizationId.eq(organization_id))
    }
}

fn to_unified(model: Room) -> UnifiedRoom {
    UnifiedRoom {
        id: ApiId::from_i32(model.id),
        organization_id: ApiId::from_i32(model.organization_id),
        name: model.name,
        capacity: model.capacity,
        location: model.location,
        description: model.description,
        actif: model.actif,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl Repository for SeaOrmRoomRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn create(&self, organization_id: i32, room: NewRoom) -> Result<UnifiedRoom, DatabaseError> {
        let now = Utc::now();
        let active_model = RoomActiveModel {
            organization_id: Set(organization_id),
            name: Set(room.name),
            capacity: Set(room.capacity),
            location: Set(room.location),
            description: Set(room.description),
            actif: Set(true),
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
        changes: RoomChanges,
    ) -> Result<UnifiedRoom, DatabaseError> {
        // Tenant scope folded into the lookup: a foreign id reads as absent
        let existing = Self::scoped(organization_id)
            .filter(rooms::Column::Id.eq(id))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?
            .ok_or_else(|| DatabaseError::not_found("Salle", id))?;

        let mut active_model: RoomActiveModel = existing.into();
        active_model.name = Set(changes.name);
        active_model.capacity = Set(changes.capacity);
        active_model.location = Set(changes.location);
        active_model.description = Set(changes.description);
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
    ) -> Result<Option<UnifiedRoom>, DatabaseError> {
        let model = Self::scoped(organization_id)
            .filter(rooms::Column::Id.eq(id))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(model.map(to_unified))
    }

    async fn find_with_list_input(
        &self,
        organization_id: i32,
        filters: RoomFilters,
        list_input: ListInput,
    ) -> Result<ListResponse<UnifiedRoom>, DatabaseError> {
        if let Some(ref name) = filters.name_contains {
            validation::validate_query_input(name)?;
        }

        let mut query = Self::scoped(organization_id);

        if let Some(name) = filters.name_contains.as_deref() {
            let pattern = format!("%{}%", sanitize_like(name).to_uppercase());
            query = query.filter(
                Expr::expr(Func::upper(Expr::col((Rooms, rooms::Column::Name)))).like(pattern),
            );
        }
        if let Some(actif) = filters.actif {
            query = query.filter(rooms::Column::Actif.eq(actif));
        }

        let pagination = list_input.get_pagination();
        let (page, limit) = (pagination.get_page(), pagination.get_limit());

        let total = query
            .clone()
            .count(self.db.get_connection())
            .await
            .map_err(map_read_err)?;

        query = match list_input.sort.as_ref() {
            Some(sort) if sort.field == "created_at" => match sort.get_direction() {
                SortDirection::Asc => query.order_by_asc(rooms::Column::CreatedAt),
                SortDirection::Desc => query.order_by_desc(rooms::Column::CreatedAt),
            },
            Some(sort) if sort.field == "name" && sort.get_direction() == SortDirection::Desc => {
                query.order_by_desc(rooms::Column::Name)
            }
            _ => query.order_by_asc(rooms::Column::Name),
        };

        let rows = query
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

    async fn deactivate(&self, organization_id: i32, ids: &[i32]) -> Result<u64, DatabaseError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = Rooms::update_many()
            .col_expr(rooms::Column::Actif, Expr::value(false))
            .col_expr(rooms::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(rooms::Column::OrganizationId.eq(organization_id))
            .filter(rooms::Column::Id.is_in(ids.to_vec()))
            .exec(self.db.get_connection())
            .await
            .map_err(map_read_err)?;

        Ok(result.rows_affected)
    }
}
