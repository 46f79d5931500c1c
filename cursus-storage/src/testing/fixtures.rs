//! Seed data for integration tests

use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use crate::connection::DatabaseConnection;
use crate::entities::{OrganizationActiveModel, UserActiveModel, UserRole};

/// Insert an organization and return its id
pub async fn seed_organization(db: &DatabaseConnection, name: &str, slug: &str) -> i32 {
    let now = Utc::now();
    let model = OrganizationActiveModel {
        uuid: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db.get_connection())
    .await
    .expect("failed to seed organization");
    model.id
}

/// Insert a back-office user and return their id
pub async fn seed_user(
    db: &DatabaseConnection,
    organization_id: i32,
    email: &str,
    role: UserRole,
) -> i32 {
    let now = Utc::now();
    let model = UserActiveModel {
        organization_id: Set(organization_id),
        email: Set(email.to_string()),
        display_name: Set(Some("Test User".to_string())),
        role: Set(role),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db.get_connection())
    .await
    .expect("failed to seed user");
    model.id
}
