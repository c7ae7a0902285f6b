//! Liveness and database reachability for both credential tiers.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when both pools answer, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the request-scoped (public credential) pool is reachable.
    pub db_healthy: bool,
    /// Whether the service-credential pool behind the admin routes is
    /// reachable.
    pub service_db_healthy: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, service_db) = tokio::join!(
        vitals_db::health_check(&state.pool),
        vitals_db::health_check(&state.service_pool),
    );
    let db_healthy = db.is_ok();
    let service_db_healthy = service_db.is_ok();

    if !service_db_healthy {
        tracing::warn!("Service database pool failed health check");
    }

    Json(HealthResponse {
        status: if db_healthy && service_db_healthy {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        service_db_healthy,
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
