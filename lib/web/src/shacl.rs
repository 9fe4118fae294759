//! SHACL validation of Turtle documents against the article shapes.

use crate::error::WepServerError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use wep_model::vocab::{SH, XSD};
use wep_shacl::{shapes_turtle, to_turtle, validate_turtle};

pub fn create_shacl_routes() -> Router<AppState> {
    Router::new()
        .route("/validate", post(handle_validate))
        .route("/shacl/shapes", get(handle_shapes))
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    rdf: Option<String>,
}

pub async fn handle_validate(
    request: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<Value>, WepServerError> {
    let Json(request) = request?;
    let data = request
        .rdf
        .filter(|rdf| !rdf.trim().is_empty())
        .ok_or_else(|| WepServerError::BadRequest("No RDF data provided".to_owned()))?;

    let report = validate_turtle(&data)?;
    debug!("SHACL validation found {} violation(s)", report.results.len());
    Ok(Json(json!({
        "conforms": report.conforms(),
        "results": report.results,
        "resultsText": report.text(),
        "validationReport": to_turtle(&report.to_graph(), &[SH, XSD])?,
    })))
}

pub async fn handle_shapes() -> Result<Json<Value>, WepServerError> {
    Ok(Json(json!({ "shapes": shapes_turtle()? })))
}
