//! REST API handlers

pub mod activities;
pub mod extranet;
pub mod fonctions;
pub mod health;
pub mod rooms;
pub mod uploads;

pub use activities::{create_activity, list_activities, list_room_activities};
pub use extranet::{auth_callback, create_invite, list_accesses, set_password};
pub use fonctions::{create_fonction, delete_fonctions, list_fonctions, update_fonction};
pub use health::health_check;
pub use rooms::{create_room, delete_rooms, get_room, list_rooms, update_room};
pub use uploads::upload_ticket_attachment;

use cursus_interfaces::NewActivity;
use cursus_rbac::{resolve_tenant, TenantContext};
use cursus_web::AuthContext;
use tracing::warn;

use crate::context::AppContext;
use crate::errors::RestResult;

/// Resolve the caller's tenant scope; called at the start of every
/// data-access handler. Failure is terminal for the request.
pub(crate) async fn resolve(ctx: &AppContext, auth: AuthContext) -> RestResult<TenantContext> {
    let tenant = resolve_tenant(ctx.repositories.user_repository(), auth.user_id).await?;
    Ok(tenant)
}

/// Record an audit activity as a best-effort side effect of a mutation.
/// Not transactional with the primary write: a failure here is logged and
/// swallowed, never surfaced as the operation's failure.
pub(crate) async fn record_activity(ctx: &AppContext, tenant: &TenantContext, activity: NewActivity) {
    if let Err(e) = ctx
        .repositories
        .activity_repository()
        .create(tenant.organization_id, activity)
        .await
    {
        warn!(error = %e, organization_id = tenant.organization_id, "audit activity insert failed");
    }
}
