//! Health check endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::context::AppContext;
use crate::models::common::{HealthCheck, HealthResponse};

/// Health check endpoint
///
/// Probes the database, reports the cache and mail provider as skipped
/// when unconfigured, and answers 503 as soon as any probe fails.
pub async fn health_check(State(ctx): State<AppContext>) -> impl IntoResponse {
    let mut checks = BTreeMap::new();

    let started = Instant::now();
    let database_check = match ctx.repositories.health_check().await {
        Ok(()) => HealthCheck::ok(started.elapsed().as_millis() as u64),
        Err(e) => HealthCheck::error(started.elapsed().as_millis() as u64, e.to_string()),
    };
    checks.insert("database".to_string(), database_check);

    let cache_check = match cursus_caching::global() {
        Some(cache) => {
            let started = Instant::now();
            match cache.stats().await {
                Ok(_) => HealthCheck::ok(started.elapsed().as_millis() as u64),
                Err(e) => HealthCheck::error(started.elapsed().as_millis() as u64, e.to_string()),
            }
        }
        None => HealthCheck::skipped(),
    };
    checks.insert("cache".to_string(), cache_check);

    // The mail provider has no probe endpoint worth hitting on every
    // health call; configured means reachable until a send says otherwise.
    let mail_check = if ctx.mail_configured {
        HealthCheck::ok(0)
    } else {
        HealthCheck::skipped()
    };
    checks.insert("mail".to_string(), mail_check);

    let response = HealthResponse::from_checks(checks);
    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
