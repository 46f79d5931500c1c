//! Extranet access repository - invites and single-use token consumption

use async_trait::async_trait;
use chrono::{Duration, Utc};
use cursus_api_types::{
    pagination::ListInput, ApiId, ListResponse, UnifiedExtranetAccess,
};
use cursus_interfaces::{
    DatabaseError, ExtranetAccessFilters, ExtranetAccessRepository, NewExtranetAccess, Repository,
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::connection::DatabaseConnection;
use crate::entities::{
    extranet_accesses, AccessStatut, ExtranetAccess, ExtranetAccessActiveModel, ExtranetAccesses,
};
use crate::errors::{map_db_err, map_read_err};
use crate::filters::{sanitize_like, validation};

const DUPLICATE_EMAIL: &str = "Un accès extranet existe déjà pour cet email";
const TOKEN_ENTITY: &str = "Lien d'invitation";

/// SeaORM implementation of the extranet access repository
#[derive(Clone)]
pub struct SeaOrmExtranetAccessRepository {
    db: DatabaseConnection,
    invite_token_ttl: Duration,
}

impl SeaOrmExtranetAccessRepository {
    pub fn new(db: DatabaseConnection, invite_token_ttl: Duration) -> Self {
        Self {
            db,
            invite_token_ttl,
        }
    }

    fn scoped(organization_id: i32) -> Select<ExtranetAccesses> {
        ExtranetAccesses::find()
            .filter(extranet_accesses::Column::OrganizationId.eq(organization_id))
    }

    async fn find_model_by_token(&self, token: &str) -> Result<Option<ExtranetAccess>, DatabaseError> {
        ExtranetAccesses::find()
            .filter(extranet_accesses::Column::InviteToken.eq(token))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)
    }
}

fn to_unified(model: ExtranetAccess) -> UnifiedExtranetAccess {
    UnifiedExtranetAccess {
        id: ApiId::from_i32(model.id),
        organization_id: ApiId::from_i32(model.organization_id),
        email: model.email,
        display_name: model.display_name,
        role: model.role.into(),
        statut: model.statut.into(),
        invite_expires_at: model.invite_token_expires_at,
        activated_at: model.activated_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl Repository for SeaOrmExtranetAccessRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ExtranetAccessRepository for SeaOrmExtranetAccessRepository {
    async fn create_invite(
        &self,
        organization_id: i32,
        access: NewExtranetAccess,
    ) -> Result<(UnifiedExtranetAccess, String), DatabaseError> {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();

        let active_model = ExtranetAccessActiveModel {
            organization_id: Set(organization_id),
            email: Set(access.email),
            display_name: Set(access.display_name),
            role: Set(access.role.into()),
            statut: Set(AccessStatut::Invite),
            invite_token: Set(Some(token.clone())),
            invite_token_expires_at: Set(Some(now + self.invite_token_ttl)),
            activated_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| map_db_err(e, DUPLICATE_EMAIL))?;
        Ok((to_unified(model), token))
    }

    async fn find_by_id(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<UnifiedExtranetAccess>, DatabaseError> {
        let model = Self::scoped(organization_id)
            .filter(extranet_accesses::Column::Id.eq(id))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(model.map(to_unified))
    }

    async fn find_with_list_input(
        &self,
        organization_id: i32,
        filters: ExtranetAccessFilters,
        list_input: ListInput,
    ) -> Result<ListResponse<UnifiedExtranetAccess>, DatabaseError> {
        if let Some(ref email) = filters.email_contains {
            validation::validate_query_input(email)?;
        }

        let mut query = Self::scoped(organization_id);

        if let Some(role) = filters.role {
            let stored: crate::entities::AccessRole = role.into();
            query = query.filter(extranet_accesses::Column::Role.eq(stored));
        }
        if let Some(statut) = filters.statut {
            query = query.filter(extranet_accesses::Column::Statut.eq(match statut {
                cursus_api_types::AccessStatus::Actif => AccessStatut::Actif,
                cursus_api_types::AccessStatus::Invite => AccessStatut::Invite,
                cursus_api_types::AccessStatus::EnAttente => AccessStatut::EnAttente,
            }));
        }
        if let Some(email) = filters.email_contains.as_deref() {
            let pattern = format!("%{}%", sanitize_like(email).to_uppercase());
            query = query.filter(
                Expr::expr(Func::upper(Expr::col((
                    ExtranetAccesses,
                    extranet_accesses::Column::Email,
                ))))
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
            .order_by_desc(extranet_accesses::Column::CreatedAt)
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

    async fn find_by_invite_token(
        &self,
        token: &str,
    ) -> Result<Option<UnifiedExtranetAccess>, DatabaseError> {
        let model = self.find_model_by_token(token).await?;
        Ok(model.map(to_unified))
    }

    async fn find_by_email_any(
        &self,
        email: &str,
    ) -> Result<Option<UnifiedExtranetAccess>, DatabaseError> {
        let model = ExtranetAccesses::find()
            .filter(extranet_accesses::Column::Email.eq(email))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(model.map(to_unified))
    }

    async fn activate_with_token(&self, token: &str) -> Result<UnifiedExtranetAccess, DatabaseError> {
        let access = self
            .find_model_by_token(token)
            .await?
            .ok_or_else(|| DatabaseError::not_found(TOKEN_ENTITY, token))?;

        // An expired token reads the same as an unknown one
        let still_valid = access
            .invite_token_expires_at
            .map(|expires_at| expires_at >= Utc::now())
            .unwrap_or(false);
        if !still_valid {
            return Err(DatabaseError::not_found(TOKEN_ENTITY, token));
        }

        let now = Utc::now();
        let mut active_model: ExtranetAccessActiveModel = access.into();
        active_model.statut = Set(AccessStatut::Actif);
        active_model.activated_at = Set(Some(now));
        active_model.invite_token = Set(None);
        active_model.invite_token_expires_at = Set(None);
        active_model.updated_at = Set(now);

        // The extra token filter makes consumption single-use: if a racing
        // request cleared it between the read and this update, no row
        // matches and the update reports nothing changed.
        let updated = ExtranetAccesses::update(active_model)
            .filter(extranet_accesses::Column::InviteToken.eq(token))
            .exec(self.db.get_connection())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => DatabaseError::not_found(TOKEN_ENTITY, token),
                other => map_read_err(other),
            })?;

        Ok(to_unified(updated))
    }
}
