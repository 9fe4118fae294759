use super::record::{require_article, select, summary_from_solution, unknown_if_invalid};
use crate::error::WepServerError;
use crate::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wep_model::{ArticleSummary, Language};
use wep_sparql::{article_recommendations, search_articles, statistics};

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    language: Option<String>,
}

pub async fn handle_search_articles(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Value>, WepServerError> {
    let Query(params) = params?;
    let term = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| WepServerError::BadRequest("Search term is required".to_owned()))?;
    let language = params
        .language
        .filter(|l| !l.is_empty())
        .map(|code| {
            code.parse::<Language>()
                .map_err(|_| WepServerError::BadRequest("Invalid language".to_owned()))
        })
        .transpose()?;

    let query = search_articles(&state.uris, &term, language);
    let results: Vec<ArticleSummary> = select(&state, &query)
        .await?
        .iter()
        .map(summary_from_solution)
        .collect();
    Ok(Json(json!({ "count": results.len(), "results": results })))
}

/// Other articles sharing a keyword or a topic with the given one.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, WepServerError> {
    require_article(&state, &id).await?;
    let query = article_recommendations(&state.uris, &id).map_err(unknown_if_invalid)?;
    let recommendations: Vec<ArticleSummary> = select(&state, &query)
        .await?
        .iter()
        .map(summary_from_solution)
        .collect();
    Ok(Json(
        json!({ "count": recommendations.len(), "recommendations": recommendations }),
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCount {
    language: String,
    count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    total_articles: u64,
    total_authors: u64,
    articles_by_language: Vec<LanguageCount>,
}

async fn count(state: &AppState, query: &str) -> Result<u64, WepServerError> {
    Ok(select(state, query)
        .await?
        .first()
        .and_then(|solution| solution.get_u64("count"))
        .unwrap_or_default())
}

pub async fn handle_statistics(
    State(state): State<AppState>,
) -> Result<Json<Statistics>, WepServerError> {
    let total_articles = count(&state, &statistics::total_articles()).await?;
    let total_authors = count(&state, &statistics::total_authors()).await?;
    let articles_by_language = select(&state, &statistics::articles_by_language())
        .await?
        .iter()
        .filter_map(|solution| {
            Some(LanguageCount {
                language: solution.get_str("language")?.to_owned(),
                count: solution.get_u64("count")?,
            })
        })
        .collect();
    Ok(Json(Statistics {
        total_articles,
        total_authors,
        articles_by_language,
    }))
}
