use crate::error::WepServerError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use wep_sparql::catalog::{self, QueryParams};
use wep_store::{ResultsDocument, ResultsFormat};

pub fn create_sparql_routes() -> Router<AppState> {
    Router::new()
        .route("/sparql/query", post(handle_query))
        .route("/sparql/update", post(handle_update))
        .route("/sparql/queries", get(handle_list_queries))
        .route("/sparql/queries/{name}", post(handle_predefined_query))
}

/// A results document relayed to the client as the store produced it.
pub struct StoreResults(pub ResultsDocument);

impl IntoResponse for StoreResults {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, self.0.content_type)], self.0.body).into_response()
    }
}

/// Runs a query and relays its SPARQL results JSON.
pub async fn relay_json(state: &AppState, query: &str) -> Result<StoreResults, WepServerError> {
    Ok(StoreResults(
        state.store.query(query, ResultsFormat::Json).await?,
    ))
}

#[derive(Deserialize)]
pub struct QueryRequest {
    query: Option<String>,
    format: Option<String>,
}

/// Passes an arbitrary query through to the store. An explicit `format` in the body wins over the
/// `Accept` header.
pub async fn handle_query(
    State(state): State<AppState>,
    negotiated: Result<ResultsFormat, WepServerError>,
    request: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<StoreResults, WepServerError> {
    let Json(request) = request?;
    let query = request
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| WepServerError::BadRequest("SPARQL query is required".to_owned()))?;
    let format = match request.format {
        Some(name) => ResultsFormat::from_name(&name)
            .ok_or_else(|| WepServerError::BadRequest(format!("Unsupported format '{name}'")))?,
        None => negotiated?,
    };
    Ok(StoreResults(state.store.query(&query, format).await?))
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    #[serde(alias = "query")]
    update: Option<String>,
}

pub async fn handle_update(
    State(state): State<AppState>,
    request: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<Value>, WepServerError> {
    let Json(request) = request?;
    let update = request
        .update
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| WepServerError::BadRequest("SPARQL update is required".to_owned()))?;
    state.store.update(&update).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Update executed successfully",
    })))
}

/// The catalog with its placeholders left in place.
pub async fn handle_list_queries() -> Json<Map<String, Value>> {
    let queries = catalog::catalog()
        .iter()
        .map(|query| {
            (
                query.key.to_owned(),
                json!({
                    "name": query.name,
                    "description": query.description,
                    "query": query.template,
                }),
            )
        })
        .collect();
    Json(queries)
}

#[derive(Default, Deserialize)]
pub struct PredefinedQueryRequest {
    #[serde(default)]
    params: PredefinedQueryParams,
}

#[derive(Default, Deserialize)]
pub struct PredefinedQueryParams {
    #[serde(alias = "TOPIC")]
    topic: Option<String>,
    #[serde(alias = "DATE")]
    date: Option<String>,
}

pub async fn handle_predefined_query(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<StoreResults, WepServerError> {
    let query = catalog::find(&name)
        .ok_or_else(|| WepServerError::NotFound("Query not found".to_owned()))?;
    let request: PredefinedQueryRequest = if body.iter().all(u8::is_ascii_whitespace) {
        PredefinedQueryRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| WepServerError::BadRequest(e.to_string()))?
    };
    let rendered = query.render(&QueryParams {
        topic: request.params.topic,
        date: request.params.date,
    })?;
    relay_json(&state, &rendered).await
}
