//! Browsing of uploaded PROV-O data. Responses are the store's SPARQL results JSON, except for
//! the provenance chain of a single article.
//!
//! `POST /search` shares its path with the article search and is routed in [`crate::articles`].

use crate::error::WepServerError;
use crate::sparql::{relay_json, StoreResults};
use crate::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use wep_sparql::{article_node, provenance};
use wep_store::{ResultsFormat, Solution};

pub fn create_provenance_routes() -> Router<AppState> {
    Router::new()
        .route("/entities", get(handle_entities))
        .route("/activities", get(handle_activities))
        .route("/agents", get(handle_agents))
        .route("/provenance-graph", get(handle_provenance_graph))
        .route("/resource", get(handle_resource))
        .route("/recommend", get(handle_recommendations))
        .route("/stats", get(handle_stats))
        .route("/provenance/{id}", get(handle_article_provenance))
}

pub async fn handle_entities(
    State(state): State<AppState>,
) -> Result<StoreResults, WepServerError> {
    relay_json(&state, &provenance::entities()).await
}

pub async fn handle_activities(
    State(state): State<AppState>,
) -> Result<StoreResults, WepServerError> {
    relay_json(&state, &provenance::activities()).await
}

pub async fn handle_agents(State(state): State<AppState>) -> Result<StoreResults, WepServerError> {
    relay_json(&state, &provenance::agents()).await
}

pub async fn handle_provenance_graph(
    State(state): State<AppState>,
) -> Result<StoreResults, WepServerError> {
    relay_json(&state, &provenance::provenance_graph()).await
}

pub async fn handle_stats(State(state): State<AppState>) -> Result<StoreResults, WepServerError> {
    relay_json(&state, &provenance::stats()).await
}

#[derive(Deserialize)]
pub struct UriParams {
    uri: Option<String>,
}

impl UriParams {
    fn required(self) -> Result<String, WepServerError> {
        self.uri
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| WepServerError::BadRequest("Parameter 'uri' is required".to_owned()))
    }
}

pub async fn handle_resource(
    State(state): State<AppState>,
    params: Result<Query<UriParams>, QueryRejection>,
) -> Result<StoreResults, WepServerError> {
    let Query(params) = params?;
    relay_json(&state, &provenance::resource(&params.required()?)?).await
}

pub async fn handle_recommendations(
    State(state): State<AppState>,
    params: Result<Query<UriParams>, QueryRejection>,
) -> Result<StoreResults, WepServerError> {
    let Query(params) = params?;
    relay_json(&state, &provenance::recommendations(&params.required()?)?).await
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    search_term: Option<String>,
}

pub async fn handle_search(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<StoreResults, WepServerError> {
    let Json(request) = request?;
    let term = request
        .search_term
        .filter(|term| !term.trim().is_empty())
        .ok_or_else(|| WepServerError::BadRequest("Search term is required".to_owned()))?;
    relay_json(&state, &provenance::search(&term)).await
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceChain {
    entity: ChainEntity,
    activity: ChainActivity,
    agent: Option<ChainAgent>,
    derived_from: Vec<String>,
}

#[derive(Serialize)]
pub struct ChainEntity {
    uri: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainActivity {
    uri: String,
    start_time: Option<String>,
    end_time: Option<String>,
}

#[derive(Serialize)]
pub struct ChainAgent {
    uri: String,
    name: Option<String>,
}

/// The activity that generated an article, its agent and its sources. When several activities
/// are recorded, the first one is reported.
pub async fn handle_article_provenance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProvenanceChain>, WepServerError> {
    let not_found = || WepServerError::NotFound("Provenance not found".to_owned());
    let entity = article_node(&state.uris, &id).map_err(|_| not_found())?;
    let query = provenance::article_chain(&state.uris, &id).map_err(|_| not_found())?;
    let solutions = state
        .store
        .query(&query, ResultsFormat::Json)
        .await?
        .solutions()?;
    let first = solutions.first().ok_or_else(not_found)?;

    let text = |solution: &Solution, variable: &str| solution.get_str(variable).map(str::to_owned);
    let mut derived_from: Vec<String> = solutions
        .iter()
        .filter_map(|solution| text(solution, "derivedFrom"))
        .collect();
    derived_from.sort_unstable();
    derived_from.dedup();

    Ok(Json(ProvenanceChain {
        entity: ChainEntity {
            uri: entity.into_string(),
            kind: "NewsArticle",
        },
        activity: ChainActivity {
            uri: text(first, "activity").unwrap_or_default(),
            start_time: text(first, "startTime"),
            end_time: text(first, "endTime"),
        },
        agent: text(first, "agent").map(|uri| ChainAgent {
            uri,
            name: text(first, "agentName"),
        }),
        derived_from,
    }))
}
