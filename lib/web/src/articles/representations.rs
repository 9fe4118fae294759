use super::record::{require_article, select, unknown_if_invalid};
use crate::error::WepServerError;
use crate::qr::qr_data_url;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use wep_mapper::{to_json_ld, to_rdfa, to_turtle};
use wep_sparql::article_properties;

#[derive(Serialize)]
pub struct Property {
    property: String,
    value: String,
}

/// Every stored predicate of the article with its value.
pub async fn handle_metadata(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Property>>, WepServerError> {
    let query = article_properties(&state.uris, &id).map_err(unknown_if_invalid)?;
    let properties = select(&state, &query)
        .await?
        .iter()
        .filter_map(|solution| {
            Some(Property {
                property: solution.get_str("property")?.to_owned(),
                value: solution.get_str("value")?.to_owned(),
            })
        })
        .collect();
    Ok(Json(properties))
}

pub async fn handle_turtle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WepServerError> {
    let article = require_article(&state, &id).await?;
    Ok((
        [(CONTENT_TYPE, "text/turtle; charset=utf-8")],
        to_turtle(&article, &state.uris),
    ))
}

pub async fn handle_json_ld(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WepServerError> {
    let article = require_article(&state, &id).await?;
    let document = to_json_ld(&article, &state.uris);
    Ok(([(CONTENT_TYPE, "application/ld+json")], document.to_string()))
}

pub async fn handle_rdfa(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WepServerError> {
    let article = require_article(&state, &id).await?;
    Ok(Html(to_rdfa(&article, &state.uris)))
}

pub async fn handle_qr_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, WepServerError> {
    let article = require_article(&state, &id).await?;
    let url = article.resolved_url(&state.uris);
    let qr_code = qr_data_url(&url).map_err(WepServerError::Internal)?;
    Ok(Json(json!({
        "articleId": article.id,
        "url": url,
        "qrCode": qr_code,
    })))
}
