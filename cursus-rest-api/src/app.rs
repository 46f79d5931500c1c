//! Router assembly

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use cursus_web::middleware::request_id::propagate_request_id_layer;
use cursus_web::{cors_layer, request_id_layer};

use crate::{context::AppContext, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// Allowed CORS origins (`*` for any)
    pub cors_origins: Vec<String>,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api/v1".to_string(),
        }
    }
}

/// Create the complete REST application
pub fn create_rest_app(context: AppContext, config: AppConfig) -> Router {
    let mut app = Router::new()
        // Health endpoint (no prefix)
        .route("/health", get(handlers::health_check))
        // Invite/magic-link redirect flow (pre-session, no prefix)
        .route("/extranet/auth/callback", get(handlers::auth_callback))
        // API routes with prefix
        .nest(&config.api_prefix, create_api_router())
        .with_state(context);

    // Middleware layers (applied in reverse order)
    if config.enable_cors {
        app = app.layer(cors_layer(&config.cors_origins));
    }

    if config.enable_request_id {
        app = app.layer(propagate_request_id_layer());
        app = app.layer(request_id_layer());
    }

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

/// API router, one group per resource
fn create_api_router() -> Router<AppContext> {
    Router::new()
        // Activity log
        .route(
            "/activites",
            get(handlers::list_activities).post(handlers::create_activity),
        )
        // Rooms
        .route(
            "/salles",
            get(handlers::list_rooms)
                .post(handlers::create_room)
                .delete(handlers::delete_rooms),
        )
        .route(
            "/salles/{id}",
            get(handlers::get_room).patch(handlers::update_room),
        )
        .route("/salles/{id}/activites", get(handlers::list_room_activities))
        // Fonctions
        .route(
            "/fonctions",
            get(handlers::list_fonctions)
                .post(handlers::create_fonction)
                .delete(handlers::delete_fonctions),
        )
        .route("/fonctions/{id}", patch(handlers::update_fonction))
        // Extranet accesses
        .route(
            "/extranet/acces",
            get(handlers::list_accesses).post(handlers::create_invite),
        )
        .route(
            "/extranet/definir-mot-de-passe",
            post(handlers::set_password),
        )
        // Ticket attachments
        .route(
            "/tickets/{id}/pieces-jointes",
            post(handlers::upload_ticket_attachment),
        )
}
