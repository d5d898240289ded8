/// Health check endpoint
///
/// Unauthenticated liveness probe; also reports database reachability.

use axum::{extract::State, http::StatusCode, Json};
use crate::app::AppState;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let database = match staffdesk_shared::db::pool::health_check(&state.db).await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            "disconnected".to_string()
        }
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: staffdesk_shared::VERSION.to_string(),
        database,
    }))
}
