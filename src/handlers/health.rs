use crate::schemas::{AppState, HealthResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, instrument};

/// Liveness and database reachability check.
///
/// Returns 503 when the database does not answer a ping, so load balancers
/// can take the instance out of rotation instead of feeding it traffic.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up and the database answers", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION").to_string();

    if let Err(ping_error) = state.db.ping().await {
        error!("Health check failed, database unreachable: {}", ping_error);
        let response = HealthResponse {
            status: "degraded".to_string(),
            version,
            database: "unreachable".to_string(),
        };
        return (StatusCode::SERVICE_UNAVAILABLE, Json(response));
    }

    let response = HealthResponse {
        status: "ok".to_string(),
        version,
        database: "reachable".to_string(),
    };
    (StatusCode::OK, Json(response))
}
