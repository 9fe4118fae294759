use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub fn create_health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handle_health))
}

/// 200 with the store's report, or 503 when the store cannot be reached.
pub async fn handle_health(State(state): State<AppState>) -> Response {
    match state.store.health().await {
        Ok(health) => Json(health).into_response(),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "fuseki": "disconnected",
                "error": error.to_string(),
            })),
        )
            .into_response(),
    }
}
