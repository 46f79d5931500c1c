//! Room ("salle") endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cursus_api_types::{
    enums::{ActivityAction, ActivityModule, ActivityOrigin},
    FieldErrors, UnifiedRoom,
};
use cursus_core::InputValidator;
use cursus_interfaces::{NewActivity, NewRoom, RoomFilters};
use cursus_rbac::Capability;
use cursus_web::{ApiResponse, AuthContext, ListQuery, QueryParams};
use tracing::info;

use crate::context::AppContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::{record_activity, resolve};
use crate::models::{common::DeleteRequest, RoomRequest};

fn parse_filters(query: &ListQuery) -> RestResult<RoomFilters> {
    let mut filters = RoomFilters::default();

    if let Some(value) = query.filter("recherche") {
        filters.name_contains = Some(value.to_string());
    }
    if let Some(value) = query.filter("actif") {
        match value {
            "true" => filters.actif = Some(true),
            "false" => filters.actif = Some(false),
            _ => {
                return Err(RestError::validation(FieldErrors::single(
                    "actif",
                    "Valeur attendue: true ou false",
                )))
            }
        }
    }

    Ok(filters)
}

/// Validate and normalize a room payload
fn validate_request(request: RoomRequest) -> Result<NewRoom, FieldErrors> {
    let validator = InputValidator::new();
    let mut errors = FieldErrors::new();

    let name = validator.required_string(&mut errors, "nom", &request.nom, 255);
    let capacity = validator.non_negative(&mut errors, "capacite", request.capacite);
    let location = validator.optional_string(&mut errors, "lieu", request.lieu, 255);
    let description = validator.optional_string(&mut errors, "description", request.description, 10_000);

    errors.into_result(NewRoom {
        name: name.unwrap_or_default(),
        capacity,
        location,
        description,
    })
}

fn audit(action: ActivityAction, room: &UnifiedRoom, description: String) -> NewActivity {
    NewActivity {
        module: ActivityModule::Parametres,
        action,
        entite_type: Some("salle".to_string()),
        entite_id: Some(room.id.to_string()),
        description,
        actor_name: None,
        actor_role: None,
        origin: ActivityOrigin::BackOffice,
        metadata: serde_json::json!({}),
    }
}

/// List rooms, name order, 25 per page
pub async fn list_rooms(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    query: QueryParams,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    let filters = parse_filters(&query.0)?;

    let page = ctx
        .repositories
        .room_repository()
        .find_with_list_input(tenant.organization_id, filters, query.0.to_list_input())
        .await?;

    Ok(Json(ApiResponse::from(page)))
}

/// Get one room
pub async fn get_room(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(room_id): Path<i32>,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;

    let room = ctx
        .repositories
        .room_repository()
        .find_by_id(tenant.organization_id, room_id)
        .await?
        .ok_or_else(|| RestError::not_found("Salle", room_id))?;

    Ok(Json(ApiResponse::new(room)))
}

/// Create a room
pub async fn create_room(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Json(request): Json<RoomRequest>,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    tenant.require(Capability::Create)?;

    info!(organization_id = tenant.organization_id, "creating room");

    let new_room = validate_request(request).map_err(RestError::validation)?;
    let room = ctx
        .repositories
        .room_repository()
        .create(tenant.organization_id, new_room)
        .await?;

    let mut entry = audit(
        ActivityAction::Creation,
        &room,
        format!("Salle « {} » créée", room.name),
    );
    entry.actor_name = tenant.actor_name.clone();
    entry.actor_role = Some(tenant.role.as_str().to_string());
    record_activity(&ctx, &tenant, entry).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(room))))
}

/// Update a room in place
pub async fn update_room(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(room_id): Path<i32>,
    Json(request): Json<RoomRequest>,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    tenant.require(Capability::Edit)?;

    let changes = validate_request(request).map_err(RestError::validation)?;
    let room = ctx
        .repositories
        .room_repository()
        .update(tenant.organization_id, room_id, changes)
        .await?;

    let mut entry = audit(
        ActivityAction::Modification,
        &room,
        format!("Salle « {} » modifiée", room.name),
    );
    entry.actor_name = tenant.actor_name.clone();
    entry.actor_role = Some(tenant.role.as_str().to_string());
    record_activity(&ctx, &tenant, entry).await;

    Ok(Json(ApiResponse::new(room)))
}

/// Soft-delete rooms: the rows stay for historical references, only the
/// `actif` flag flips
pub async fn delete_rooms(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Json(request): Json<DeleteRequest>,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    tenant.require(Capability::Delete)?;

    if request.ids.is_empty() {
        return Err(RestError::validation(FieldErrors::single(
            "ids",
            "Au moins un identifiant est requis",
        )));
    }

    let affected = ctx
        .repositories
        .room_repository()
        .deactivate(tenant.organization_id, &request.ids)
        .await?;

    if affected == 0 {
        return Err(RestError::not_found(
            "Salle",
            request
                .ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ));
    }

    record_activity(
        &ctx,
        &tenant,
        NewActivity {
            module: ActivityModule::Parametres,
            action: ActivityAction::Suppression,
            entite_type: Some("salle".to_string()),
            entite_id: None,
            description: format!("{} salle(s) désactivée(s)", affected),
            actor_name: tenant.actor_name.clone(),
            actor_role: Some(tenant.role.as_str().to_string()),
            origin: ActivityOrigin::BackOffice,
            metadata: serde_json::json!({ "ids": request.ids }),
        },
    )
    .await;

    Ok(Json(ApiResponse::new(serde_json::json!({ "success": true, "count": affected }))))
}
