//! Tenant-scoped repository implementations

pub mod activity_repository;
pub mod extranet_access_repository;
pub mod fonction_repository;
pub mod organization_repository;
pub mod room_repository;
pub mod user_repository;

pub use activity_repository::SeaOrmActivityRepository;
pub use extranet_access_repository::SeaOrmExtranetAccessRepository;
pub use fonction_repository::SeaOrmFonctionRepository;
pub use organization_repository::SeaOrmOrganizationRepository;
pub use room_repository::SeaOrmRoomRepository;
pub use user_repository::SeaOrmUserRepository;

use async_trait::async_trait;
use cursus_interfaces::{
    ActivityRepository, DatabaseError, ExtranetAccessRepository, FonctionRepository,
    OrganizationRepository, RepositoryFactory, RoomRepository, UserRepository,
};

use crate::connection::DatabaseConnection;

/// Factory wiring every repository to one shared connection
pub struct SeaOrmRepositoryFactory {
    db: DatabaseConnection,
    activities: SeaOrmActivityRepository,
    rooms: SeaOrmRoomRepository,
    fonctions: SeaOrmFonctionRepository,
    extranet_accesses: SeaOrmExtranetAccessRepository,
    users: SeaOrmUserRepository,
    organizations: SeaOrmOrganizationRepository,
}

impl SeaOrmRepositoryFactory {
    /// Build the factory. `invite_token_ttl` is the validity window applied
    /// to newly issued extranet invite tokens.
    pub fn new(db: DatabaseConnection, invite_token_ttl: chrono::Duration) -> Self {
        Self {
            activities: SeaOrmActivityRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            fonctions: SeaOrmFonctionRepository::new(db.clone()),
            extranet_accesses: SeaOrmExtranetAccessRepository::new(db.clone(), invite_token_ttl),
            users: SeaOrmUserRepository::new(db.clone()),
            organizations: SeaOrmOrganizationRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryFactory for SeaOrmRepositoryFactory {
    fn activity_repository(&self) -> &dyn ActivityRepository {
        &self.activities
    }

    fn room_repository(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn fonction_repository(&self) -> &dyn FonctionRepository {
        &self.fonctions
    }

    fn extranet_access_repository(&self) -> &dyn ExtranetAccessRepository {
        &self.extranet_accesses
    }

    fn user_repository(&self) -> &dyn UserRepository {
        &self.users
    }

    fn organization_repository(&self) -> &dyn OrganizationRepository {
        &self.organizations
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(|e| DatabaseError::Connection {
            message: e.to_string(),
        })
    }
}
