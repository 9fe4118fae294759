use crate::error::WepServerError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

const DEFAULT_MEDIA_TYPE: &str = "text/turtle";

pub fn create_upload_routes() -> Router<AppState> {
    Router::new().route("/upload", post(handle_upload))
}

#[derive(Deserialize)]
struct UploadRequest {
    data: Option<String>,
    format: Option<String>,
}

/// Maps the short format names accepted in JSON uploads to media types. Media types pass through.
fn media_type(format: &str) -> String {
    match format.to_ascii_lowercase().as_str() {
        "turtle" | "ttl" => "text/turtle".to_owned(),
        "ntriples" | "nt" | "n-triples" => "application/n-triples".to_owned(),
        "nquads" | "nq" | "n-quads" => "application/n-quads".to_owned(),
        "trig" => "application/trig".to_owned(),
        "rdfxml" | "xml" | "rdf/xml" => "application/rdf+xml".to_owned(),
        "jsonld" | "json-ld" => "application/ld+json".to_owned(),
        _ => format.to_owned(),
    }
}

/// Adds RDF data to the store. Accepts either a JSON body `{data, format}` or a raw RDF document
/// whose `Content-Type` names its syntax.
pub async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, WepServerError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_MEDIA_TYPE)
        .to_owned();

    let (data, content_type) = if content_type.starts_with("application/json") {
        let request: UploadRequest = serde_json::from_slice(&body)
            .map_err(|e| WepServerError::BadRequest(e.to_string()))?;
        let data = request
            .data
            .filter(|data| !data.trim().is_empty())
            .ok_or_else(|| WepServerError::BadRequest("No data provided".to_owned()))?;
        let format = request.format.as_deref().map_or_else(
            || DEFAULT_MEDIA_TYPE.to_owned(),
            media_type,
        );
        (data.into_bytes(), format)
    } else if body.iter().all(u8::is_ascii_whitespace) {
        return Err(WepServerError::BadRequest("No data provided".to_owned()));
    } else {
        (body.to_vec(), content_type)
    };

    let size = data.len();
    state.store.upload(data, &content_type).await?;
    info!("Uploaded {size} bytes of {content_type}");
    Ok(Json(json!({
        "success": true,
        "message": "Data uploaded successfully",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(media_type("Turtle"), "text/turtle");
        assert_eq!(media_type("jsonld"), "application/ld+json");
        assert_eq!(media_type("application/rdf+xml"), "application/rdf+xml");
    }
}
