//! Organization repository

use async_trait::async_trait;
use cursus_api_types::{ApiId, UnifiedOrganization};
use cursus_interfaces::{DatabaseError, OrganizationRepository, Repository};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::connection::DatabaseConnection;
use crate::entities::{organizations, Organization, Organizations};
use crate::errors::map_read_err;

/// SeaORM implementation of the organization repository
#[derive(Clone)]
pub struct SeaOrmOrganizationRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrganizationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_unified(model: Organization) -> UnifiedOrganization {
    UnifiedOrganization {
        id: ApiId::from_i32(model.id),
        name: model.name,
        slug: model.slug,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl Repository for SeaOrmOrganizationRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl OrganizationRepository for SeaOrmOrganizationRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedOrganization>, DatabaseError> {
        let model = Organizations::find_by_id(id)
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(model.map(to_unified))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<UnifiedOrganization>, DatabaseError> {
        let model = Organizations::find()
            .filter(organizations::Column::Slug.eq(slug))
            .one(self.db.get_connection())
            .await
            .map_err(map_read_err)?;
        Ok(model.map(to_unified))
    }
}
