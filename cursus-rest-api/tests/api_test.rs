//! End-to-end API tests over the full router and in-memory SQLite

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use cursus_api_types::ExtranetRole;
use cursus_interfaces::{AuthProvider, NewExtranetAccess, RepositoryFactory, UnconfiguredAuthProvider};
use cursus_rest_api::{create_rest_app, mailer::LogMailer, AppConfig, AppContext};
use cursus_storage::entities::{ActivityActiveModel, UserRole};
use cursus_storage::testing::{fixtures, TestDatabase};
use cursus_web::SessionVerifier;
use http::header::{HeaderName, HeaderValue, AUTHORIZATION};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::{json, Value};

const SECRET: &str = "integration-test-secret-0123456789abcdef";

struct Harness {
    server: TestServer,
    db: TestDatabase,
    factory: Arc<cursus_storage::SeaOrmRepositoryFactory>,
    verifier: SessionVerifier,
    org_a: i32,
    org_b: i32,
    admin_a: i32,
    user_a: i32,
    admin_b: i32,
    _uploads_dir: tempfile::TempDir,
}

impl Harness {
    fn bearer(&self, user_id: i32) -> (HeaderName, HeaderValue) {
        let token = self.verifier.issue(user_id, 3600).unwrap();
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        )
    }
}

async fn setup() -> Harness {
    setup_with_provider(Arc::new(UnconfiguredAuthProvider)).await
}

async fn setup_with_provider(auth_provider: Arc<dyn AuthProvider>) -> Harness {
    let db = TestDatabase::new().await;
    let org_a = fixtures::seed_organization(&db.connection, "Org A", "org-a").await;
    let org_b = fixtures::seed_organization(&db.connection, "Org B", "org-b").await;
    let admin_a = fixtures::seed_user(&db.connection, org_a, "admin@org-a.fr", UserRole::Admin).await;
    let user_a = fixtures::seed_user(&db.connection, org_a, "user@org-a.fr", UserRole::User).await;
    let admin_b = fixtures::seed_user(&db.connection, org_b, "admin@org-b.fr", UserRole::Admin).await;

    let factory = Arc::new(db.factory());
    let verifier = SessionVerifier::new(SECRET);
    let uploads_dir = tempfile::tempdir().unwrap();

    let mut uploads = cursus_config::domains::uploads::UploadsConfig::default();
    uploads.dir = uploads_dir.path().to_string_lossy().to_string();

    let context = AppContext {
        repositories: factory.clone(),
        mailer: Arc::new(LogMailer),
        auth_provider,
        verifier: verifier.clone(),
        uploads,
        mail_configured: false,
        app_base_url: "http://localhost:8080".to_string(),
    };

    let app = create_rest_app(context, AppConfig::default());
    let server = TestServer::new(app).unwrap();

    Harness {
        server,
        db,
        factory,
        verifier,
        org_a,
        org_b,
        admin_a,
        user_a,
        admin_b,
        _uploads_dir: uploads_dir,
    }
}

#[tokio::test]
async fn test_health_reports_ok_with_skipped_dependencies() {
    let h = setup().await;

    let response = h.server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["mail"]["status"], "skipped");
}

#[tokio::test]
async fn test_unauthenticated_request_is_rejected() {
    let h = setup().await;

    let response = h.server.get("/api/v1/salles").await;
    response.assert_status_unauthorized();

    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Non authentifié");
}

#[tokio::test]
async fn test_activity_empty_entity_pair_persists_as_null() {
    let h = setup().await;
    let (name, value) = h.bearer(h.admin_a);

    let response = h
        .server
        .post("/api/v1/activites")
        .add_header(name, value)
        .json(&json!({
            "contenu": "Appel effectué",
            "entite_type": "",
            "entite_id": ""
        }))
        .await;
    response.assert_status(http::StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["data"]["description"], "Appel effectué");
    assert!(body["data"]["entite_type"].is_null());
    assert!(body["data"]["entite_id"].is_null());
}

#[tokio::test]
async fn test_half_entity_pair_is_a_field_error() {
    let h = setup().await;
    let (name, value) = h.bearer(h.admin_a);

    let response = h
        .server
        .post("/api/v1/activites")
        .add_header(name, value)
        .json(&json!({
            "contenu": "Appel effectué",
            "entite_type": "entreprise"
        }))
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["fields"]["entite_id"].is_array());

    // The same rule holds on the query side
    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .get("/api/v1/activites?entite_id=42")
        .add_header(name, value)
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_activity_pagination_contract() {
    let h = setup().await;

    for i in 0..30 {
        let (name, value) = h.bearer(h.admin_a);
        h.server
            .post("/api/v1/activites")
            .add_header(name, value)
            .json(&json!({ "contenu": format!("activité {}", i) }))
            .await
            .assert_status(http::StatusCode::CREATED);
    }

    let (name, value) = h.bearer(h.admin_a);
    let response = h.server.get("/api/v1/activites").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 25);
    assert_eq!(body["meta"]["pagination"]["total"], 30);
    assert_eq!(body["meta"]["pagination"]["limit"], 25);

    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .get("/api/v1/activites?page=2")
        .add_header(name, value)
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["meta"]["pagination"]["total"], 30);
    assert_eq!(body["meta"]["pagination"]["offset"], 25);
}

#[tokio::test]
async fn test_activity_date_range_is_inclusive_end_to_end() {
    let h = setup().await;

    let rows = [
        ("avant", Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap()),
        ("debut", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ("fin", Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()),
        ("apres", Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
    ];
    for (description, created_at) in rows {
        ActivityActiveModel {
            organization_id: Set(h.org_a),
            module: Set("sessions".to_string()),
            action: Set("creation".to_string()),
            entite_type: Set(None),
            entite_id: Set(None),
            description: Set(description.to_string()),
            actor_name: Set(None),
            actor_role: Set(None),
            origin: Set("back_office".to_string()),
            metadata: Set(json!({})),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(h.db.connection.get_connection())
        .await
        .unwrap();
    }

    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .get("/api/v1/activites?date_debut=2024-01-01&date_fin=2024-01-31")
        .add_header(name, value)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let descriptions: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["description"].as_str().unwrap())
        .collect();
    assert_eq!(body["meta"]["pagination"]["total"], 2);
    assert!(descriptions.contains(&"debut"));
    assert!(descriptions.contains(&"fin"));
}

#[tokio::test]
async fn test_duplicate_room_name_is_a_friendly_conflict() {
    let h = setup().await;

    let (name, value) = h.bearer(h.admin_a);
    h.server
        .post("/api/v1/salles")
        .add_header(name, value)
        .json(&json!({ "nom": "Salle Curie" }))
        .await
        .assert_status(http::StatusCode::CREATED);

    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .post("/api/v1/salles")
        .add_header(name, value)
        .json(&json!({ "nom": "Salle Curie" }))
        .await;
    response.assert_status(http::StatusCode::CONFLICT);

    let body: Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("existe déjà"));
}

#[tokio::test]
async fn test_cross_tenant_mutation_reads_as_not_found() {
    let h = setup().await;

    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .post("/api/v1/salles")
        .add_header(name, value)
        .json(&json!({ "nom": "Salle Turing" }))
        .await;
    let room_id: i32 = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    // Org B's admin cannot see or touch it
    let (name, value) = h.bearer(h.admin_b);
    let response = h
        .server
        .get(&format!("/api/v1/salles/{}", room_id))
        .add_header(name, value)
        .await;
    response.assert_status_not_found();

    let (name, value) = h.bearer(h.admin_b);
    let response = h
        .server
        .patch(&format!("/api/v1/salles/{}", room_id))
        .add_header(name, value)
        .json(&json!({ "nom": "Pirate" }))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_role_gate_blocks_delete_for_user_role() {
    let h = setup().await;

    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .post("/api/v1/salles")
        .add_header(name, value)
        .json(&json!({ "nom": "Salle Ada" }))
        .await;
    let room_id: i32 = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let (name, value) = h.bearer(h.user_a);
    let response = h
        .server
        .delete("/api/v1/salles")
        .add_header(name, value)
        .json(&json!({ "ids": [room_id] }))
        .await;
    response.assert_status_forbidden();

    let body: Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Permission refusée"));

    // The admin can
    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .delete("/api/v1/salles")
        .add_header(name, value)
        .json(&json!({ "ids": [room_id] }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["success"], true);
}

#[tokio::test]
async fn test_room_scoped_activities_verify_tenant_first() {
    let h = setup().await;

    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .post("/api/v1/salles")
        .add_header(name, value)
        .json(&json!({ "nom": "Salle Lovelace" }))
        .await;
    let room_id: i32 = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    // Under the owning tenant: an empty page, not an error (the create
    // audit entry references the room, so at least one row exists)
    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .get(&format!("/api/v1/salles/{}/activites", room_id))
        .add_header(name, value)
        .await;
    response.assert_status_ok();

    // Under the wrong tenant: not-found, distinct from "no events yet"
    let (name, value) = h.bearer(h.admin_b);
    let response = h
        .server
        .get(&format!("/api/v1/salles/{}/activites", room_id))
        .add_header(name, value)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_invite_callback_and_single_use_password_set() {
    let h = setup().await;

    let (_, token) = h
        .factory
        .extranet_access_repository()
        .create_invite(
            h.org_a,
            NewExtranetAccess {
                email: "apprenant@client.fr".to_string(),
                display_name: None,
                role: ExtranetRole::Apprenant,
            },
        )
        .await
        .unwrap();

    // Valid token redirects to password setup
    let response = h
        .server
        .get(&format!("/extranet/auth/callback?token={}", token))
        .await;
    response.assert_status(http::StatusCode::SEE_OTHER);
    let location = response.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with("/extranet/definir-mot-de-passe?token="));

    // Setting the password consumes the token and lands on the role route
    let response = h
        .server
        .post("/api/v1/extranet/definir-mot-de-passe")
        .json(&json!({ "token": token, "password": "motdepasse!" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["redirect_to"], "/apprenant");

    // A second attempt with the same token fails
    let response = h
        .server
        .post("/api/v1/extranet/definir-mot-de-passe")
        .json(&json!({ "token": token, "password": "motdepasse!" }))
        .await;
    response.assert_status_bad_request();
    assert!(response
        .json::<Value>()["error"]["message"]
        .as_str()
        .unwrap()
        .contains("invalid_or_expired_link"));

    // ... and the consumed token now redirects to the error route
    let response = h
        .server
        .get(&format!("/extranet/auth/callback?token={}", token))
        .await;
    response.assert_status(http::StatusCode::SEE_OTHER);
    let location = response.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(location, "/connexion?error=invalid_or_expired_link");
}

#[tokio::test]
async fn test_expired_invite_token_always_redirects_to_error() {
    let h = setup().await;

    let expired_factory = h.db.factory_with_invite_ttl(chrono::Duration::hours(-1));
    let (_, token) = expired_factory
        .extranet_access_repository()
        .create_invite(
            h.org_a,
            NewExtranetAccess {
                email: "tard@client.fr".to_string(),
                display_name: None,
                role: ExtranetRole::Formateur,
            },
        )
        .await
        .unwrap();

    let response = h
        .server
        .get(&format!("/extranet/auth/callback?token={}", token))
        .await;
    response.assert_status(http::StatusCode::SEE_OTHER);
    let location = response.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(location, "/connexion?error=invalid_or_expired_link");
}

#[tokio::test]
async fn test_callback_without_params_redirects_missing_params() {
    let h = setup().await;

    let response = h.server.get("/extranet/auth/callback").await;
    response.assert_status(http::StatusCode::SEE_OTHER);
    let location = response.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(location, "/connexion?error=missing_params");
}

struct StubProvider {
    email: String,
}

#[async_trait]
impl AuthProvider for StubProvider {
    async fn verify_token_hash(&self, token_hash: &str, _otp_type: &str) -> Option<String> {
        (token_hash == "valid-hash").then(|| self.email.clone())
    }
}

#[tokio::test]
async fn test_provider_pair_routes_by_role_and_access() {
    let h = setup_with_provider(Arc::new(StubProvider {
        email: "formateur@client.fr".to_string(),
    }))
    .await;

    // No access record yet: verified identity but nothing to open
    let response = h
        .server
        .get("/extranet/auth/callback?token_hash=valid-hash&type=magiclink")
        .await;
    response.assert_status(http::StatusCode::SEE_OTHER);
    let location = response.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(location, "/connexion?error=no_access");

    // With an active access, the pair lands on the role route
    let (_, token) = h
        .factory
        .extranet_access_repository()
        .create_invite(
            h.org_a,
            NewExtranetAccess {
                email: "formateur@client.fr".to_string(),
                display_name: None,
                role: ExtranetRole::Formateur,
            },
        )
        .await
        .unwrap();
    h.factory
        .extranet_access_repository()
        .activate_with_token(&token)
        .await
        .unwrap();

    let response = h
        .server
        .get("/extranet/auth/callback?token_hash=valid-hash&type=magiclink")
        .await;
    response.assert_status(http::StatusCode::SEE_OTHER);
    let location = response.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(location, "/formateur");

    // An unverifiable pair reads as an invalid link
    let response = h
        .server
        .get("/extranet/auth/callback?token_hash=bad-hash&type=magiclink")
        .await;
    response.assert_status(http::StatusCode::SEE_OTHER);
    let location = response.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(location, "/connexion?error=invalid_or_expired_link");
}

fn multipart_body(boundary: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"fichier\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[tokio::test]
async fn test_ticket_attachment_upload_policy() {
    let h = setup().await;
    let boundary = "cursus-test-boundary";

    // Accepted: a small PDF
    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .post("/api/v1/tickets/7/pieces-jointes")
        .add_header(name, value)
        .add_header(
            http::header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={}", boundary)).unwrap(),
        )
        .bytes(multipart_body(boundary, "devis 2024.pdf", "application/pdf", b"%PDF-1.4 test").into())
        .await;
    response.assert_status(http::StatusCode::CREATED);

    let body: Value = response.json();
    let path = body["data"]["path"].as_str().unwrap();
    assert!(path.starts_with(&format!("org-{}/tickets/7/", h.org_a)));
    assert!(path.ends_with("devis_2024.pdf"));

    // Rejected: MIME type outside the allow-list
    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .post("/api/v1/tickets/7/pieces-jointes")
        .add_header(name, value)
        .add_header(
            http::header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={}", boundary)).unwrap(),
        )
        .bytes(multipart_body(boundary, "virus.exe", "application/x-msdownload", b"MZ").into())
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_fonction_lifecycle_keeps_display_order() {
    let h = setup().await;

    for nom in ["Directeur", "Assistant", "Formateur référent"] {
        let (name, value) = h.bearer(h.admin_a);
        h.server
            .post("/api/v1/fonctions")
            .add_header(name, value)
            .json(&json!({ "nom": nom }))
            .await
            .assert_status(http::StatusCode::CREATED);
    }

    let (name, value) = h.bearer(h.admin_a);
    let response = h.server.get("/api/v1/fonctions").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    // Creation order is display order when no position is given
    assert_eq!(names, vec!["Directeur", "Assistant", "Formateur référent"]);

    let first_id: i32 = body["data"][0]["id"].as_str().unwrap().parse().unwrap();

    // Duplicate name within the tenant conflicts
    let (name, value) = h.bearer(h.admin_a);
    h.server
        .post("/api/v1/fonctions")
        .add_header(name, value)
        .json(&json!({ "nom": "Directeur" }))
        .await
        .assert_status(http::StatusCode::CONFLICT);

    // Update and delete round out the lifecycle
    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .patch(&format!("/api/v1/fonctions/{}", first_id))
        .add_header(name, value)
        .json(&json!({ "nom": "Directeur général" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["name"], "Directeur général");

    let (name, value) = h.bearer(h.admin_a);
    let response = h
        .server
        .delete("/api/v1/fonctions")
        .add_header(name, value)
        .json(&json!({ "ids": [first_id] }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["count"], 1);
}
