use super::record::{require_article, select, summary_from_solution, unknown_if_invalid};
use crate::error::WepServerError;
use crate::qr::qr_data_url;
use crate::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use wep_mapper::to_turtle;
use wep_model::{Article, ArticleInput, ArticleSummary, Language};
use wep_sparql::criteria::parse_date_time;
use wep_sparql::{delete_article, insert_data, list_articles, replace_article, ArticleFilter};

#[derive(Deserialize)]
pub struct ListParams {
    language: Option<String>,
    topic: Option<String>,
    since: Option<String>,
    until: Option<String>,
    limit: Option<u32>,
}

impl ListParams {
    fn into_filter(self) -> Result<ArticleFilter, WepServerError> {
        let language = non_empty(self.language)
            .map(|code| {
                code.parse::<Language>()
                    .map_err(|_| WepServerError::BadRequest("Invalid language".to_owned()))
            })
            .transpose()?;
        let since = non_empty(self.since)
            .map(|value| parse_date_time(&value))
            .transpose()?;
        let until = non_empty(self.until)
            .map(|value| parse_date_time(&value))
            .transpose()?;
        Ok(ArticleFilter {
            language,
            topic: non_empty(self.topic),
            since,
            until,
            limit: self.limit,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn handle_list_articles(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<ArticleSummary>>, WepServerError> {
    let Query(params) = params?;
    let query = list_articles(&state.uris, &params.into_filter()?);
    let summaries = select(&state, &query)
        .await?
        .iter()
        .map(summary_from_solution)
        .collect();
    Ok(Json(summaries))
}

pub async fn handle_get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, WepServerError> {
    Ok(Json(require_article(&state, &id).await?))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedArticle {
    #[serde(flatten)]
    article: Article,
    qr_code: String,
}

pub async fn handle_create_article(
    State(state): State<AppState>,
    input: Result<Json<ArticleInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedArticle>), WepServerError> {
    let Json(input) = input?;
    let mut article = input.validate(Uuid::new_v4().to_string())?;
    article.created_at = Some(Utc::now());
    article.resolve_defaults(&state.uris);

    state
        .store
        .update(&insert_data(&to_turtle(&article, &state.uris)))
        .await?;
    info!("Created article {}", article.id);

    let qr_code =
        qr_data_url(&article.resolved_url(&state.uris)).map_err(WepServerError::Internal)?;
    Ok((StatusCode::CREATED, Json(CreatedArticle { article, qr_code })))
}

/// Replaces every stored field of an existing article. The creation time and the public url are
/// carried over from the stored record unless the request sets a url.
pub async fn handle_update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    input: Result<Json<ArticleInput>, JsonRejection>,
) -> Result<Json<Article>, WepServerError> {
    let Json(input) = input?;
    let mut article = input.validate(id.as_str())?;
    let existing = require_article(&state, &id).await?;
    article.created_at = existing.created_at;
    article.url = article.url.or(existing.url);
    article.updated_at = Some(Utc::now());
    article.resolve_defaults(&state.uris);

    let update = replace_article(&state.uris, &id, &to_turtle(&article, &state.uris))
        .map_err(unknown_if_invalid)?;
    state.store.update(&update).await?;
    info!("Updated article {id}");

    Ok(Json(article))
}

pub async fn handle_delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, WepServerError> {
    let update = delete_article(&state.uris, &id).map_err(unknown_if_invalid)?;
    state.store.update(&update).await?;
    info!("Deleted article {id}");
    Ok(Json(json!({ "message": "Article deleted successfully" })))
}
