//! Ticket attachment upload endpoint
//!
//! Multipart form data, MIME allow-list, 10 MB ceiling. The storage path
//! is namespaced by tenant and ticket id and salted with a UUID so two
//! uploads of the same filename never collide.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cursus_api_types::FieldErrors;
use cursus_web::{ApiResponse, AuthContext};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::context::AppContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::resolve;

/// Stored attachment descriptor
#[derive(Debug, Clone, Serialize)]
pub struct UploadedAttachment {
    pub path: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: usize,
}

/// Keep letters, digits, dots, dashes and underscores; everything else
/// becomes an underscore
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "fichier".to_string()
    } else {
        cleaned
    }
}

/// Accept a ticket attachment
pub async fn upload_ticket_attachment(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(ticket_id): Path<i32>,
    mut multipart: Multipart,
) -> RestResult<impl IntoResponse> {
    let tenant = resolve(&ctx, auth).await?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| RestError::bad_request(format!("Multipart invalide: {}", e)))?
        .ok_or_else(|| {
            RestError::validation(FieldErrors::single("fichier", "Aucun fichier fourni"))
        })?;

    let filename = sanitize_filename(field.file_name().unwrap_or("fichier"));
    let content_type = field
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_default();

    if !ctx.uploads.is_allowed_mime(&content_type) {
        return Err(RestError::validation(FieldErrors::single(
            "fichier",
            "Type de fichier non autorisé",
        )));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| RestError::bad_request(format!("Lecture du fichier impossible: {}", e)))?;

    if bytes.len() > ctx.uploads.max_size_bytes {
        return Err(RestError::validation(FieldErrors::single(
            "fichier",
            format!(
                "Fichier trop volumineux ({} Mo maximum)",
                ctx.uploads.max_size_bytes / (1024 * 1024)
            ),
        )));
    }

    // Tenant- and ticket-namespaced, collision-resistant
    let relative_path = format!(
        "org-{}/tickets/{}/{}-{}",
        tenant.organization_id,
        ticket_id,
        Uuid::new_v4(),
        filename
    );
    let full_path = std::path::Path::new(&ctx.uploads.dir).join(&relative_path);

    if let Some(parent) = full_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RestError::InternalError(format!("upload directory: {}", e)))?;
    }
    tokio::fs::write(&full_path, &bytes)
        .await
        .map_err(|e| RestError::InternalError(format!("upload write: {}", e)))?;

    info!(
        organization_id = tenant.organization_id,
        ticket_id,
        size = bytes.len(),
        "ticket attachment stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(UploadedAttachment {
            path: relative_path,
            filename,
            content_type,
            size_bytes: bytes.len(),
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("devis 2024.pdf"), "devis_2024.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename(""), "fichier");
    }
}
