//! Fonction endpoints
//!
//! The fonction list is small and stable, so pages are served through the
//! best-effort cache when one is configured. Every mutation drops the
//! tenant's cached pages; a cache failure only costs the shortcut.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cursus_api_types::{
    enums::{ActivityAction, ActivityModule, ActivityOrigin},
    FieldErrors,
};
use cursus_core::InputValidator;
use cursus_interfaces::{FonctionFilters, NewActivity, NewFonction};
use cursus_rbac::Capability;
use cursus_web::{ApiResponse, AuthContext, QueryParams};
use std::time::Duration;
use tracing::debug;

use crate::context::AppContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::{record_activity, resolve};
use crate::models::{common::DeleteRequest, FonctionRequest};

const CACHE_TTL: Duration = Duration::from_secs(60);

fn cache_key(organization_id: i32, page: u32, limit: u32, search: Option<&str>) -> String {
    format!(
        "org-{}:fonctions:p{}-l{}-q{}",
        organization_id,
        page,
        limit,
        search.unwrap_or("")
    )
}

/// Drop every cached fonction page for the tenant; best effort
async fn invalidate_cache(organization_id: i32) {
    if let Some(cache) = cursus_caching::global() {
        if let Err(e) = cache
            .invalidate_pattern(&format!("org-{}:fonctions:*", organization_id))
            .await
        {
            debug!(error = %e, "fonction cache invalidation failed");
        }
    }
}

fn validate_request(request: FonctionRequest) -> Result<NewFonction, FieldErrors> {
    let validator = InputValidator::new();
    let mut errors = FieldErrors::new();

    let name = validator.required_string(&mut errors, "nom", &request.nom, 255);
    let position = validator.non_negative(&mut errors, "position", request.position);

    errors.into_result(NewFonction {
        name: name.unwrap_or_default(),
        position,
    })
}

/// List fonctions in display order
pub async fn list_fonctions(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    query: QueryParams,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;

    let search = query.0.filter("recherche").map(str::to_string);
    let pagination = query.0.pagination.clone();
    let key = cache_key(
        tenant.organization_id,
        pagination.get_page(),
        pagination.get_limit(),
        search.as_deref(),
    );

    // Cache hit short-circuits the query; any cache trouble falls through
    // to the source of truth.
    if let Some(cache) = cursus_caching::global() {
        if let Ok(Some(cached)) = cache.get(&key).await {
            return Ok(Json(cached));
        }
    }

    let filters = FonctionFilters {
        name_contains: search,
    };
    let page = ctx
        .repositories
        .fonction_repository()
        .find_with_list_input(tenant.organization_id, filters, query.0.to_list_input())
        .await?;

    let body = serde_json::to_value(ApiResponse::from(page))
        .map_err(|e| RestError::InternalError(e.to_string()))?;

    if let Some(cache) = cursus_caching::global() {
        if let Err(e) = cache.put_with_ttl(key, body.clone(), CACHE_TTL).await {
            debug!(error = %e, "fonction cache write failed");
        }
    }

    Ok(Json(body))
}

/// Create a fonction, appended at the end of the list unless a position
/// is given
pub async fn create_fonction(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Json(request): Json<FonctionRequest>,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    tenant.require(Capability::Create)?;

    let new_fonction = validate_request(request).map_err(RestError::validation)?;
    let fonction = ctx
        .repositories
        .fonction_repository()
        .create(tenant.organization_id, new_fonction)
        .await?;

    invalidate_cache(tenant.organization_id).await;

    record_activity(
        &ctx,
        &tenant,
        NewActivity {
            module: ActivityModule::Parametres,
            action: ActivityAction::Creation,
            entite_type: Some("fonction".to_string()),
            entite_id: Some(fonction.id.to_string()),
            description: format!("Fonction « {} » créée", fonction.name),
            actor_name: tenant.actor_name.clone(),
            actor_role: Some(tenant.role.as_str().to_string()),
            origin: ActivityOrigin::BackOffice,
            metadata: serde_json::json!({}),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(fonction))))
}

/// Update a fonction in place
pub async fn update_fonction(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(fonction_id): Path<i32>,
    Json(request): Json<FonctionRequest>,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    tenant.require(Capability::Edit)?;

    let changes = validate_request(request).map_err(RestError::validation)?;
    let fonction = ctx
        .repositories
        .fonction_repository()
        .update(tenant.organization_id, fonction_id, changes)
        .await?;

    invalidate_cache(tenant.organization_id).await;

    record_activity(
        &ctx,
        &tenant,
        NewActivity {
            module: ActivityModule::Parametres,
            action: ActivityAction::Modification,
            entite_type: Some("fonction".to_string()),
            entite_id: Some(fonction.id.to_string()),
            description: format!("Fonction « {} » modifiée", fonction.name),
            actor_name: tenant.actor_name.clone(),
            actor_role: Some(tenant.role.as_str().to_string()),
            origin: ActivityOrigin::BackOffice,
            metadata: serde_json::json!({}),
        },
    )
    .await;

    Ok(Json(ApiResponse::new(fonction)))
}

/// Delete fonctions
pub async fn delete_fonctions(
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
        .fonction_repository()
        .delete(tenant.organization_id, &request.ids)
        .await?;

    if affected == 0 {
        return Err(RestError::not_found(
            "Fonction",
            request
                .ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ));
    }

    invalidate_cache(tenant.organization_id).await;

    record_activity(
        &ctx,
        &tenant,
        NewActivity {
            module: ActivityModule::Parametres,
            action: ActivityAction::Suppression,
            entite_type: Some("fonction".to_string()),
            entite_id: None,
            description: format!("{} fonction(s) supprimée(s)", affected),
            actor_name: tenant.actor_name.clone(),
            actor_role: Some(tenant.role.as_str().to_string()),
            origin: ActivityOrigin::BackOffice,
            metadata: serde_json::json!({ "ids": request.ids }),
        },
    )
    .await;

    Ok(Json(ApiResponse::new(serde_json::json!({ "success": true, "count": affected }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_tenant_scoped() {
        let a = cache_key(1, 1, 25, None);
        let b = cache_key(2, 1, 25, None);
        assert_ne!(a, b);
        assert!(a.starts_with("org-1:fonctions:"));
    }
}
