//! Extranet access endpoints: invitations and the auth callback
//!
//! The callback is a pure redirect decision table. It accepts either the
//! provider-issued `token_hash`/`type` pair (verification delegated to the
//! external provider) or our single-use `token`, and resolves to exactly
//! one of: password setup, the role landing route, or the login page with
//! a machine-readable error code.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::Utc;
use cursus_api_types::{
    enums::{ActivityAction, ActivityModule, ActivityOrigin, ExtranetRole},
    AccessStatus, FieldErrors, UnifiedExtranetAccess,
};
use cursus_core::InputValidator;
use cursus_interfaces::{
    DatabaseError, EmailMessage, ExtranetAccessFilters, NewActivity, NewExtranetAccess,
};
use cursus_rbac::{extranet::PASSWORD_SETUP_ROUTE, landing_route, AuthRedirectError, Capability};
use cursus_web::{ApiResponse, AuthContext, QueryParams};
use serde::Deserialize;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::{record_activity, resolve};
use crate::models::{CreateInviteRequest, SetPasswordRequest, SetPasswordResponse};

/// List the tenant's extranet accesses
pub async fn list_accesses(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    query: QueryParams,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;

    let mut filters = ExtranetAccessFilters::default();
    if let Some(value) = query.0.filter("role") {
        filters.role = value
            .parse::<ExtranetRole>()
            .map(Some)
            .map_err(|_| RestError::validation(FieldErrors::single("role", "Valeur inconnue")))?;
    }
    if let Some(value) = query.0.filter("statut") {
        filters.statut = value
            .parse::<AccessStatus>()
            .map(Some)
            .map_err(|_| RestError::validation(FieldErrors::single("statut", "Valeur inconnue")))?;
    }
    if let Some(value) = query.0.filter("recherche") {
        filters.email_contains = Some(value.to_string());
    }

    let page = ctx
        .repositories
        .extranet_access_repository()
        .find_with_list_input(tenant.organization_id, filters, query.0.to_list_input())
        .await?;

    Ok(Json(ApiResponse::from(page)))
}

/// Invite someone to the extranet: creates the access in `invite` status
/// with a 24 h single-use token and dispatches the invitation email as a
/// best-effort side effect.
pub async fn create_invite(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Json(request): Json<CreateInviteRequest>,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;
    tenant.require(Capability::ManageExtranet)?;

    let validator = InputValidator::new();
    let mut errors = FieldErrors::new();
    let email = validator.email(&mut errors, "email", &request.email);
    let display_name = validator.optional_string(&mut errors, "nom", request.nom, 255);
    if !errors.is_empty() {
        return Err(RestError::validation(errors));
    }

    info!(organization_id = tenant.organization_id, "issuing extranet invite");

    let (access, token) = ctx
        .repositories
        .extranet_access_repository()
        .create_invite(
            tenant.organization_id,
            NewExtranetAccess {
                email: email.unwrap_or_default(),
                display_name,
                role: request.role,
            },
        )
        .await?;

    // Email dispatch is a side channel: a provider failure is logged and
    // swallowed, the invite itself stands.
    let link = format!(
        "{}/extranet/auth/callback?token={}",
        ctx.app_base_url.trim_end_matches('/'),
        token
    );
    let message = EmailMessage {
        to: access.email.clone(),
        subject: "Votre accès à l'extranet".to_string(),
        body_html: format!(
            "<p>Bonjour,</p><p>Un accès extranet vous a été ouvert. \
             Cliquez sur <a href=\"{}\">ce lien</a> pour définir votre mot de passe. \
             Le lien est valable 24 heures.</p>",
            link
        ),
    };
    if let Err(e) = ctx.mailer.send(message).await {
        warn!(error = %e, email = %access.email, "invitation email dispatch failed");
    }

    record_activity(
        &ctx,
        &tenant,
        NewActivity {
            module: ActivityModule::Extranet,
            action: ActivityAction::Envoi,
            entite_type: Some("acces_extranet".to_string()),
            entite_id: Some(access.id.to_string()),
            description: format!("Invitation extranet envoyée à {}", access.email),
            actor_name: tenant.actor_name.clone(),
            actor_role: Some(tenant.role.as_str().to_string()),
            origin: ActivityOrigin::BackOffice,
            metadata: serde_json::json!({}),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(access))))
}

/// Query parameters accepted by the auth callback
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub token_hash: Option<String>,
    #[serde(rename = "type")]
    pub otp_type: Option<String>,
    pub token: Option<String>,
}

fn error_redirect(error: AuthRedirectError) -> Redirect {
    Redirect::to(&error.redirect_target())
}

fn access_redirect(access: &UnifiedExtranetAccess, token: Option<&str>) -> Redirect {
    if access.statut.awaiting_activation() {
        match token {
            Some(token) => Redirect::to(&format!("{}?token={}", PASSWORD_SETUP_ROUTE, token)),
            None => Redirect::to(PASSWORD_SETUP_ROUTE),
        }
    } else {
        Redirect::to(landing_route(access.role))
    }
}

/// Invite-link / magic-link redirect flow
pub async fn auth_callback(
    State(ctx): State<AppContext>,
    Query(params): Query<CallbackParams>,
) -> RestResult<Redirect> {
    // Custom single-use token path
    if let Some(token) = params.token.as_deref().filter(|t| !t.is_empty()) {
        let access = ctx
            .repositories
            .extranet_access_repository()
            .find_by_invite_token(token)
            .await?;

        let Some(access) = access else {
            return Ok(error_redirect(AuthRedirectError::InvalidOrExpiredLink));
        };

        let expired = access
            .invite_expires_at
            .map(|expires_at| expires_at < Utc::now())
            .unwrap_or(true);
        if expired {
            return Ok(error_redirect(AuthRedirectError::InvalidOrExpiredLink));
        }

        return Ok(access_redirect(&access, Some(token)));
    }

    // Provider pair path; verification is fully delegated
    if let (Some(token_hash), Some(otp_type)) = (
        params.token_hash.as_deref().filter(|t| !t.is_empty()),
        params.otp_type.as_deref().filter(|t| !t.is_empty()),
    ) {
        let Some(email) = ctx.auth_provider.verify_token_hash(token_hash, otp_type).await else {
            return Ok(error_redirect(AuthRedirectError::InvalidOrExpiredLink));
        };

        let access = ctx
            .repositories
            .extranet_access_repository()
            .find_by_email_any(&email)
            .await?;

        return match access {
            Some(access) => Ok(access_redirect(&access, None)),
            None => Ok(error_redirect(AuthRedirectError::NoAccess)),
        };
    }

    Ok(error_redirect(AuthRedirectError::MissingParams))
}

/// First password set: consumes the invite token and activates the access.
/// Password storage itself lives with the external auth provider; this
/// side only records the activation.
pub async fn set_password(
    State(ctx): State<AppContext>,
    Json(request): Json<SetPasswordRequest>,
) -> RestResult<impl IntoResponse> {
    let mut errors = FieldErrors::new();
    if request.token.trim().is_empty() {
        errors.add("token", "Ce champ est requis");
    }
    if request.password.chars().count() < 8 {
        errors.add("password", "8 caractères minimum");
    }
    if !errors.is_empty() {
        return Err(RestError::validation(errors));
    }

    let access = ctx
        .repositories
        .extranet_access_repository()
        .activate_with_token(request.token.trim())
        .await
        .map_err(|e| match e {
            // Unknown, consumed and expired all read the same to the caller
            DatabaseError::NotFound { .. } => RestError::bad_request("invalid_or_expired_link"),
            other => RestError::Database(other),
        })?;

    info!(access_id = %access.id, "extranet access activated");

    Ok(Json(ApiResponse::new(SetPasswordResponse {
        redirect_to: landing_route(access.role).to_string(),
    })))
}
