use crate::AppState;
use api_shared::{CallCountsRes, HealthRes, HealthService};
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/diagnostics/calls",
    responses(
        (status = 200, description = "Calls per route since startup", body = CallCountsRes)
    )
)]
/// Per-route call counts. Diagnostic only; counts reset on restart.
#[axum::debug_handler]
pub async fn calls(State(state): State<AppState>) -> Json<CallCountsRes> {
    Json(CallCountsRes {
        calls: state.calls.snapshot(),
    })
}
