use crate::AppState;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

pub fn create_index_routes() -> Router<AppState> {
    Router::new().route("/", get(handle_index))
}

pub async fn handle_index() -> Json<Value> {
    Json(json!({
        "message": "WeP - Web News Provenance API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "articles": "/api/articles",
            "sparql": "/api/sparql",
            "search": "/api/search",
            "statistics": "/api/statistics",
            "entities": "/api/entities",
            "activities": "/api/activities",
            "agents": "/api/agents",
            "provenanceGraph": "/api/provenance-graph",
            "resource": "/api/resource",
            "recommend": "/api/recommend",
            "stats": "/api/stats",
            "provenance": "/api/provenance/{id}",
            "validate": "/api/validate",
            "shapes": "/api/shacl/shapes",
            "health": "/api/health",
            "upload": "/api/upload",
        },
    }))
}

pub async fn handle_not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
