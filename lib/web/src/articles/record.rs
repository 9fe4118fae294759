//! Re-derives articles from query solutions.

use crate::error::WepServerError;
use crate::AppState;
use anyhow::anyhow;
use wep_model::{timestamp, Article, ArticleSummary, ContentType, Language};
use wep_sparql::BuildError;
use wep_store::{ResultsFormat, Solution};

/// Runs a `SELECT` and returns its solutions.
pub async fn select(state: &AppState, query: &str) -> Result<Vec<Solution>, WepServerError> {
    let document = state.store.query(query, ResultsFormat::Json).await?;
    Ok(document.solutions()?)
}

/// Ids that do not form a valid IRI cannot name a stored article.
pub fn unknown_if_invalid(error: BuildError) -> WepServerError {
    match error {
        BuildError::InvalidIri { .. } => WepServerError::article_not_found(),
        error @ BuildError::InvalidDateTime(_) => error.into(),
    }
}

/// Loads an article, or `None` when the store has no record of it.
pub async fn fetch_article(state: &AppState, id: &str) -> Result<Option<Article>, WepServerError> {
    let query = match wep_sparql::article_by_id(&state.uris, id) {
        Ok(query) => query,
        Err(BuildError::InvalidIri { .. }) => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    select(state, &query)
        .await?
        .first()
        .map(|solution| article_from_solution(id, solution))
        .transpose()
}

/// Like [`fetch_article`], failing with 404 when the article does not exist.
pub async fn require_article(state: &AppState, id: &str) -> Result<Article, WepServerError> {
    fetch_article(state, id)
        .await?
        .ok_or_else(WepServerError::article_not_found)
}

fn article_from_solution(id: &str, solution: &Solution) -> Result<Article, WepServerError> {
    let text = |variable: &str| solution.get_str(variable).map(str::to_owned);
    let required = |variable: &str| {
        text(variable)
            .ok_or_else(|| WepServerError::Internal(anyhow!("Article {id} has no {variable}")))
    };

    let language = required("language")?;
    let language = language.parse::<Language>().map_err(|e| {
        WepServerError::Internal(anyhow!("Article {id} is stored with an invalid language: {e}"))
    })?;
    let content_type = solution
        .get_str("contentType")
        .and_then(|code| code.parse::<ContentType>().ok())
        .unwrap_or_default();
    let created_at = solution
        .get_str("date")
        .and_then(|date| timestamp::parse(date).ok());
    let updated_at = solution
        .get_str("modified")
        .and_then(|date| timestamp::parse(date).ok())
        .filter(|modified| Some(*modified) != created_at);

    Ok(Article {
        id: id.to_owned(),
        title: required("title")?,
        content: required("content")?,
        author: required("author")?,
        language,
        content_type,
        description: text("description"),
        word_count: solution.get_u64("wordCount"),
        created_at,
        updated_at,
        url: text("url"),
        license: text("license"),
        source: text("source"),
    })
}

pub fn summary_from_solution(solution: &Solution) -> ArticleSummary {
    let text = |variable: &str| solution.get_str(variable).unwrap_or_default().to_owned();
    ArticleSummary {
        id: text("id"),
        title: text("title"),
        author: text("author"),
        date: text("date"),
        language: text("language"),
        description: text("description"),
    }
}
