//! Activity log endpoints
//!
//! The most reused pattern of the service: tenant filter first, optional
//! caller filters AND-combined, fixed 25-row pages, newest first.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use cursus_api_types::{
    enums::{ActivityAction, ActivityModule, ActivityOrigin},
    FieldErrors,
};
use cursus_core::InputValidator;
use cursus_interfaces::{ActivityFilters, NewActivity};
use cursus_rbac::Capability;
use cursus_web::{ApiResponse, AuthContext, ListQuery, QueryParams};
use tracing::info;

use crate::context::AppContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::resolve;
use crate::models::CreateActivityRequest;

/// Parse the activity filter set out of the query string.
///
/// The entity pair only filters together: supplying exactly one half is a
/// field-level error rather than a silently unfiltered result.
fn parse_filters(query: &ListQuery) -> RestResult<ActivityFilters> {
    let mut errors = FieldErrors::new();
    let mut filters = ActivityFilters::default();

    if let Some(value) = query.filter("module") {
        match ActivityModule::parse_lossy(value) {
            ActivityModule::Inconnu => errors.add("module", "Valeur inconnue"),
            module => filters.module = Some(module),
        }
    }
    if let Some(value) = query.filter("action") {
        match ActivityAction::parse_lossy(value) {
            ActivityAction::Inconnu => errors.add("action", "Valeur inconnue"),
            action => filters.action = Some(action),
        }
    }
    if let Some(value) = query.filter("origine") {
        match ActivityOrigin::parse_lossy(value) {
            ActivityOrigin::Inconnu => errors.add("origine", "Valeur inconnue"),
            origin => filters.origin = Some(origin),
        }
    }

    let entite_type = query.filter("entite_type");
    let entite_id = query.filter("entite_id");
    match (entite_type, entite_id) {
        (Some(entite_type), Some(entite_id)) => {
            filters.entite_type = Some(entite_type.to_string());
            filters.entite_id = Some(entite_id.to_string());
        }
        (Some(_), None) => errors.add("entite_id", "Requis lorsque entite_type est fourni"),
        (None, Some(_)) => errors.add("entite_type", "Requis lorsque entite_id est fourni"),
        (None, None) => {}
    }

    if let Some(value) = query.filter("acteur_role") {
        filters.actor_role = Some(value.to_string());
    }
    if let Some(value) = query.filter("recherche") {
        filters.search = Some(value.to_string());
    }

    for (key, target) in [
        ("date_debut", &mut filters.date_debut),
        ("date_fin", &mut filters.date_fin),
    ] {
        if let Some(value) = query.filter(key) {
            match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => *target = Some(date),
                Err(_) => errors.add(key, "Date invalide (format attendu: AAAA-MM-JJ)"),
            }
        }
    }

    errors.into_result(filters).map_err(RestError::validation)
}

/// List the tenant's activity log with optional filters
pub async fn list_activities(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    query: QueryParams,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    let filters = parse_filters(&query.0)?;

    let page = ctx
        .repositories
        .activity_repository()
        .find_with_list_input(tenant.organization_id, filters, query.0.to_list_input())
        .await?;

    Ok(Json(ApiResponse::from(page)))
}

/// List activities scoped to one room.
///
/// The scoping entity is verified against the caller's tenant first, so a
/// wrong-tenant id answers 404 instead of an empty page.
pub async fn list_room_activities(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(room_id): Path<i32>,
    query: QueryParams,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;

    ctx.repositories
        .room_repository()
        .find_by_id(tenant.organization_id, room_id)
        .await?
        .ok_or_else(|| RestError::not_found("Salle", room_id))?;

    let filters = ActivityFilters {
        entite_type: Some("salle".to_string()),
        entite_id: Some(room_id.to_string()),
        ..Default::default()
    };

    let page = ctx
        .repositories
        .activity_repository()
        .find_with_list_input(tenant.organization_id, filters, query.0.to_list_input())
        .await?;

    Ok(Json(ApiResponse::from(page)))
}

/// Record an activity from the back office
pub async fn create_activity(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Json(request): Json<CreateActivityRequest>,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    tenant.require(Capability::Create)?;

    info!(organization_id = tenant.organization_id, "recording activity");

    let validator = InputValidator::new();
    let mut errors = FieldErrors::new();

    let contenu = validator.required_string(&mut errors, "contenu", &request.contenu, 10_000);
    let entite_type = validator.optional_string(&mut errors, "entite_type", request.entite_type, 50);
    let entite_id = validator.optional_string(&mut errors, "entite_id", request.entite_id, 64);

    // After empty-string normalization, the pair must be both or neither
    match (&entite_type, &entite_id) {
        (Some(_), None) => errors.add("entite_id", "Requis lorsque entite_type est fourni"),
        (None, Some(_)) => errors.add("entite_type", "Requis lorsque entite_id est fourni"),
        _ => {}
    }

    if !errors.is_empty() {
        return Err(RestError::validation(errors));
    }

    let activity = NewActivity {
        module: request.module.unwrap_or(ActivityModule::Messagerie),
        action: request.action.unwrap_or(ActivityAction::Creation),
        entite_type,
        entite_id,
        description: contenu.unwrap_or_default(),
        actor_name: tenant.actor_name.clone(),
        actor_role: Some(tenant.role.as_str().to_string()),
        origin: ActivityOrigin::BackOffice,
        metadata: request.metadata.unwrap_or_else(|| serde_json::json!({})),
    };

    let created = ctx
        .repositories
        .activity_repository()
        .create(tenant.organization_id, activity)
        .await?;

    Ok((axum::http::StatusCode::CREATED, Json(ApiResponse::new(created))))
}
