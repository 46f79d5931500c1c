//! Back-office user repository

use async_trait::async_trait;
use chrono::Utc;
use cursus_api_types::{ApiId, UnifiedUser};
use cursus_interfaces::{DatabaseError, Repository, UserRepository};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};

use crate::connection::DatabaseConnection;
use crate::entities::{users, User, UserActiveModel, Users};
use crate::errors::map_read_err;

/// SeaORM implementation of the user repository
#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_unified(model: User) -> UnifiedUser {
    UnifiedUser {
        id: ApiId::from_i32(model.id),
        organization_id: ApiId::from_i32(model.organization_id),
        email: model.email,
        display_name: model.display_name,
        role: model.role.into(),
        is_active: model.is_active,
        created_at: model.created_at,
        last_login_at: model.last_login_at,
    }
}

#[async_trait]
impl Repository for SeaOrmUserRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_membership(&self, user_id: i32) -> Result<Option<UnifiedUser>, DatabaseError> {
        let model = Users::find_by_id(user_id)
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(model.map(to_unified))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UnifiedUser>, DatabaseError> {
        let model = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(model.map(to_unified))
    }

    async fn touch_last_login(&self, user_id: i32) -> Result<(), DatabaseError> {
        let active_model = UserActiveModel {
            id: Set(user_id),
            last_login_at: Set(Some(Utc::now())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        match active_model.update(self.db.get_connection()).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(DatabaseError::not_found("Utilisateur", user_id)),
            Err(other) => Err(map_read_err(other)),
        }
    }
}
