//! Activity repository - tenant-scoped, filterable, paginated audit log

use async_trait::async_trait;
use chrono::Utc;
use cursus_api_types::{
    enums::{ActivityAction, ActivityModule, ActivityOrigin},
    pagination::{ListInput, SortDirection},
    ApiId, ListResponse, UnifiedActivity,
};
use cursus_interfaces::{
    ActivityFilters, ActivityRepository, DatabaseError, NewActivity, Repository,
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use tracing::warn;

use crate::connection::DatabaseConnection;
use crate::entities::{activities, Activities, Activity, ActivityActiveModel};
use crate::errors::{map_db_err, map_read_err};
use crate::filters::{day_end, day_start, sanitize_like, validation};

/// SeaORM implementation of the activity repository
#[derive(Clone)]
pub struct SeaOrmActivityRepository {
    db: DatabaseConnection,
}

impl SeaOrmActivityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Base query: tenant filter first, always
    fn scoped(organization_id: i32) -> Select<Activities> {
        Activities::find().filter(activities::Column::OrganizationId.eq(organization_id))
    }
}

/// Map a stored row to its public shape. Unknown module/action/origin
/// values narrow to the fallback arm with a log line rather than failing
/// the whole page.
fn to_unified(model: Activity) -> UnifiedActivity {
    let module = ActivityModule::parse_lossy(&model.module);
    if module == ActivityModule::Inconnu {
        warn!(value = %model.module, "unknown activity module value in storage");
    }
    let action = ActivityAction::parse_lossy(&model.action);
    if action == ActivityAction::Inconnu {
        warn!(value = %model.action, "unknown activity action value in storage");
    }
    let origin = ActivityOrigin::parse_lossy(&model.origin);
    if origin == ActivityOrigin::Inconnu {
        warn!(value = %model.origin, "unknown activity origin value in storage");
    }

    UnifiedActivity {
        id: ApiId::from_i32(model.id),
        organization_id: ApiId::from_i32(model.organization_id),
        module,
        action,
        entite_type: model.entite_type,
        entite_id: model.entite_id,
        description: model.description,
        actor_name: model.actor_name,
        actor_role: model.actor_role,
        origin,
        metadata: model.metadata,
        created_at: model.created_at,
    }
}

#[async_trait]
impl Repository for SeaOrmActivityRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ActivityRepository for SeaOrmActivityRepository {
    async fn create(
        &self,
        organization_id: i32,
        activity: NewActivity,
    ) -> Result<UnifiedActivity, DatabaseError> {
        let active_model = ActivityActiveModel {
            organization_id: Set(organization_id),
            module: Set(activity.module.as_str().to_string()),
            action: Set(activity.action.as_str().to_string()),
            entite_type: Set(activity.entite_type),
            entite_id: Set(activity.entite_id),
            description: Set(activity.description),
            actor_name: Set(activity.actor_name),
            actor_role: Set(activity.actor_role),
            origin: Set(activity.origin.as_str().to_string()),
            metadata: Set(activity.metadata),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err(e, "Impossible d'enregistrer l'activité"))?;
        Ok(to_unified(model))
    }

    async fn find_with_list_input(
        &self,
        organization_id: i32,
        filters: ActivityFilters,
        list_input: ListInput,
    ) -> Result<ListResponse<UnifiedActivity>, DatabaseError> {
        if let Some(ref search) = filters.search {
            validation::validate_query_input(search)?;
        }
        if let Some(ref actor_role) = filters.actor_role {
            validation::validate_query_input(actor_role)?;
        }

        let mut query = Self::scoped(organization_id);

        if let Some(module) = filters.module {
            query = query.filter(activities::Column::Module.eq(module.as_str()));
        }
        if let Some(action) = filters.action {
            query = query.filter(activities::Column::Action.eq(action.as_str()));
        }
        if let Some(origin) = filters.origin {
            query = query.filter(activities::Column::Origin.eq(origin.as_str()));
        }

        // Entity scoping only applies as a complete pair; the handler has
        // already rejected a half-supplied one.
        if let (Some(entite_type), Some(entite_id)) =
            (filters.entite_type.as_deref(), filters.entite_id.as_deref())
        {
            query = query
                .filter(activities::Column::EntiteType.eq(entite_type))
                .filter(activities::Column::EntiteId.eq(entite_id));
        }

        if let Some(actor_role) = filters.actor_role.as_deref() {
            query = query.filter(activities::Column::ActorRole.eq(actor_role));
        }

        if let Some(search) = filters.search.as_deref() {
            let pattern = format!("%{}%", sanitize_like(search).to_uppercase());
            query = query.filter(
                Expr::expr(Func::upper(Expr::col((
                    Activities,
                    activities::Column::Description,
                ))))
                .like(pattern),
            );
        }

        if let Some(date_debut) = filters.date_debut {
            query = query.filter(activities::Column::CreatedAt.gte(day_start(date_debut)));
        }
        if let Some(date_fin) = filters.date_fin {
            query = query.filter(activities::Column::CreatedAt.lte(day_end(date_fin)));
        }

        let pagination = list_input.get_pagination();
        let (page, limit) = (pagination.get_page(), pagination.get_limit());

        let total = query
            .clone()
            .count(self.db.get_connection())
            .await
            .map_err(map_read_err)?;

        // Newest first unless the caller asked for the opposite
        query = match list_input.sort.as_ref() {
            Some(sort) if sort.field == "created_at" => match sort.get_direction() {
                SortDirection::Asc => query.order_by_asc(activities::Column::CreatedAt),
                SortDirection::Desc => query.order_by_desc(activities::Column::CreatedAt),
            },
            _ => query.order_by_desc(activities::Column::CreatedAt),
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

    async fn count(&self, organization_id: i32) -> Result<u64, DatabaseError> {
        Self::scoped(organization_id)
            .count(self.db.get_connection())
            .await
            .map_err(map_read_err)
    }
}
