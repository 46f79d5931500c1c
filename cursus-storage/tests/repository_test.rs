//! Repository integration tests over in-memory SQLite

use chrono::{Duration, TimeZone, Utc};
use cursus_api_types::enums::{ActivityAction, ActivityModule, ActivityOrigin, ExtranetRole};
use cursus_api_types::pagination::{ListInput, PaginationInput};
use cursus_interfaces::{
    ActivityFilters, DatabaseError, NewActivity, NewExtranetAccess, NewFonction, NewRoom,
    RepositoryFactory, RoomFilters,
};
use sea_orm::{ActiveModelTrait, Set};
use cursus_storage::entities::ActivityActiveModel;
use cursus_storage::testing::{fixtures, TestDatabase};

fn new_activity(description: &str) -> NewActivity {
    NewActivity {
        module: ActivityModule::Apprenants,
        action: ActivityAction::Creation,
        entite_type: None,
        entite_id: None,
        description: description.to_string(),
        actor_name: Some("Jeanne Martin".to_string()),
        actor_role: Some("admin".to_string()),
        origin: ActivityOrigin::BackOffice,
        metadata: serde_json::json!({}),
    }
}

fn page(n: u32) -> ListInput {
    ListInput {
        pagination: Some(PaginationInput {
            page: Some(n),
            limit: None,
        }),
        sort: None,
    }
}

#[tokio::test]
async fn test_pagination_arithmetic() {
    let db = TestDatabase::new().await;
    let org = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let factory = db.factory();
    let activities = factory.activity_repository();

    for i in 0..30 {
        activities
            .create(org, new_activity(&format!("activité {}", i)))
            .await
            .unwrap();
    }

    let first = activities
        .find_with_list_input(org, ActivityFilters::default(), page(1))
        .await
        .unwrap();
    assert_eq!(first.items.len(), 25);
    assert_eq!(first.meta.total, 30);
    assert_eq!(first.meta.offset, 0);
    assert_eq!(first.meta.total_pages, 2);

    let second = activities
        .find_with_list_input(org, ActivityFilters::default(), page(2))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 5);
    assert_eq!(second.meta.total, 30);
    assert_eq!(second.meta.offset, 25);
}

#[tokio::test]
async fn test_tenant_isolation_on_reads_and_mutations() {
    let db = TestDatabase::new().await;
    let org_a = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let org_b = fixtures::seed_organization(&db.connection, "Org B", "org-b").await;
    let factory = db.factory();
    let rooms = factory.room_repository();

    let room = rooms
        .create(
            org_a,
            NewRoom {
                name: "Salle Turing".to_string(),
                capacity: Some(12),
                location: None,
                description: None,
            },
        )
        .await
        .unwrap();
    let room_id = room.id.as_i32().unwrap();

    // A valid id under the wrong tenant reads as absent
    assert!(rooms.find_by_id(org_b, room_id).await.unwrap().is_none());

    // ... and fails mutation as not-found, never as success
    let err = rooms
        .update(
            org_b,
            room_id,
            NewRoom {
                name: "Pirate".to_string(),
                capacity: None,
                location: None,
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { .. }));

    // Soft delete under the wrong tenant touches nothing
    assert_eq!(rooms.deactivate(org_b, &[room_id]).await.unwrap(), 0);
    let untouched = rooms.find_by_id(org_a, room_id).await.unwrap().unwrap();
    assert!(untouched.actif);
    assert_eq!(untouched.name, "Salle Turing");
}

#[tokio::test]
async fn test_duplicate_name_maps_to_friendly_conflict() {
    let db = TestDatabase::new().await;
    let org_a = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let org_b = fixtures::seed_organization(&db.connection, "Org B", "org-b").await;
    let factory = db.factory();
    let rooms = factory.room_repository();

    let new_room = || NewRoom {
        name: "Salle Curie".to_string(),
        capacity: None,
        location: None,
        description: None,
    };

    rooms.create(org_a, new_room()).await.unwrap();

    let err = rooms.create(org_a, new_room()).await.unwrap_err();
    match err {
        DatabaseError::Constraint { message } => {
            assert!(message.contains("existe déjà"), "got: {}", message);
        }
        other => panic!("expected constraint error, got {:?}", other),
    }

    // The same name is fine under another tenant
    assert!(rooms.create(org_b, new_room()).await.is_ok());
}

#[tokio::test]
async fn test_date_range_bounds_are_inclusive() {
    let db = TestDatabase::new().await;
    let org = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let factory = db.factory();
    let activities = factory.activity_repository();

    // Rows pinned to exact timestamps around the window edges
    let timestamps = [
        Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap() + Duration::milliseconds(999),
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    ];
    for (i, ts) in timestamps.iter().enumerate() {
        ActivityActiveModel {
            organization_id: Set(org),
            module: Set("sessions".to_string()),
            action: Set("creation".to_string()),
            entite_type: Set(None),
            entite_id: Set(None),
            description: Set(format!("row {}", i)),
            actor_name: Set(None),
            actor_role: Set(None),
            origin: Set("back_office".to_string()),
            metadata: Set(serde_json::json!({})),
            created_at: Set(*ts),
            ..Default::default()
        }
        .insert(db.connection.get_connection())
        .await
        .unwrap();
    }

    let filters = ActivityFilters {
        date_debut: Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        date_fin: Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
        ..Default::default()
    };
    let result = activities
        .find_with_list_input(org, filters, page(1))
        .await
        .unwrap();

    // 00:00:00.000 and 23:59:59.999 are both inside the window
    assert_eq!(result.meta.total, 3);
    let descriptions: Vec<_> = result.items.iter().map(|a| a.description.as_str()).collect();
    assert!(!descriptions.contains(&"row 0"));
    assert!(!descriptions.contains(&"row 4"));
}

#[tokio::test]
async fn test_entity_pair_filter_and_search() {
    let db = TestDatabase::new().await;
    let org = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let factory = db.factory();
    let activities = factory.activity_repository();

    let mut scoped = new_activity("Appel effectué");
    scoped.entite_type = Some("entreprise".to_string());
    scoped.entite_id = Some("42".to_string());
    activities.create(org, scoped).await.unwrap();
    activities.create(org, new_activity("Relance devis")).await.unwrap();

    let filters = ActivityFilters {
        entite_type: Some("entreprise".to_string()),
        entite_id: Some("42".to_string()),
        ..Default::default()
    };
    let result = activities
        .find_with_list_input(org, filters, page(1))
        .await
        .unwrap();
    assert_eq!(result.meta.total, 1);
    assert_eq!(result.items[0].description, "Appel effectué");

    // Case-insensitive substring search on the description
    let filters = ActivityFilters {
        search: Some("appel".to_string()),
        ..Default::default()
    };
    let result = activities
        .find_with_list_input(org, filters, page(1))
        .await
        .unwrap();
    assert_eq!(result.meta.total, 1);
}

#[tokio::test]
async fn test_room_soft_delete_keeps_row() {
    let db = TestDatabase::new().await;
    let org = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let factory = db.factory();
    let rooms = factory.room_repository();

    let room = rooms
        .create(
            org,
            NewRoom {
                name: "Salle Ada".to_string(),
                capacity: None,
                location: None,
                description: None,
            },
        )
        .await
        .unwrap();
    let room_id = room.id.as_i32().unwrap();

    assert_eq!(rooms.deactivate(org, &[room_id]).await.unwrap(), 1);

    // The row is still there, just inactive
    let kept = rooms.find_by_id(org, room_id).await.unwrap().unwrap();
    assert!(!kept.actif);

    let active_only = rooms
        .find_with_list_input(
            org,
            RoomFilters {
                actif: Some(true),
                ..Default::default()
            },
            page(1),
        )
        .await
        .unwrap();
    assert_eq!(active_only.meta.total, 0);
}

#[tokio::test]
async fn test_fonction_position_appends() {
    let db = TestDatabase::new().await;
    let org = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let factory = db.factory();
    let fonctions = factory.fonction_repository();

    let first = fonctions
        .create(
            org,
            NewFonction {
                name: "Directeur".to_string(),
                position: None,
            },
        )
        .await
        .unwrap();
    let second = fonctions
        .create(
            org,
            NewFonction {
                name: "Formateur référent".to_string(),
                position: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(first.position, 1);
    assert_eq!(second.position, 2);

    let listing = fonctions
        .find_with_list_input(org, Default::default(), page(1))
        .await
        .unwrap();
    assert_eq!(listing.items[0].name, "Directeur");
    assert_eq!(listing.items[1].name, "Formateur référent");
}

#[tokio::test]
async fn test_invite_token_is_single_use() {
    let db = TestDatabase::new().await;
    let org = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let factory = db.factory();
    let accesses = factory.extranet_access_repository();

    let (access, token) = accesses
        .create_invite(
            org,
            NewExtranetAccess {
                email: "marc@client.fr".to_string(),
                display_name: None,
                role: ExtranetRole::ContactClient,
            },
        )
        .await
        .unwrap();
    assert_eq!(access.statut, cursus_api_types::AccessStatus::Invite);
    assert!(access.invite_expires_at.is_some());

    // First consumption activates and clears the token
    let activated = accesses.activate_with_token(&token).await.unwrap();
    assert_eq!(activated.statut, cursus_api_types::AccessStatus::Actif);
    assert!(activated.activated_at.is_some());
    assert!(activated.invite_expires_at.is_none());

    // Second attempt with the same token fails as not-found
    let err = accesses.activate_with_token(&token).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { .. }));
    assert!(accesses.find_by_invite_token(&token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_invite_token_is_rejected() {
    let db = TestDatabase::new().await;
    let org = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    // TTL in the past: the token is born expired
    let factory = db.factory_with_invite_ttl(Duration::hours(-1));
    let accesses = factory.extranet_access_repository();

    let (_, token) = accesses
        .create_invite(
            org,
            NewExtranetAccess {
                email: "zoe@client.fr".to_string(),
                display_name: None,
                role: ExtranetRole::Apprenant,
            },
        )
        .await
        .unwrap();

    let err = accesses.activate_with_token(&token).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { .. }));

    // The token was not consumed, it is simply expired
    assert!(accesses.find_by_invite_token(&token).await.unwrap().is_some());
}

#[tokio::test]
async fn test_duplicate_invite_email_conflicts() {
    let db = TestDatabase::new().await;
    let org = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let factory = db.factory();
    let accesses = factory.extranet_access_repository();

    let invite = || NewExtranetAccess {
        email: "sam@client.fr".to_string(),
        display_name: None,
        role: ExtranetRole::Formateur,
    };

    accesses.create_invite(org, invite()).await.unwrap();
    let err = accesses.create_invite(org, invite()).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Constraint { .. }));
}
