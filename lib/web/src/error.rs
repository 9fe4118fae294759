use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wep_model::ValidationErrors;
use wep_shacl::ShaclError;
use wep_sparql::BuildError;
use wep_store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum WepServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("Content Negotiation Failed: {0}")]
    ContentNegotiation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Internal server error: {0}")]
    Internal(anyhow::Error),
}

impl WepServerError {
    pub fn article_not_found() -> Self {
        WepServerError::NotFound("Article not found".to_owned())
    }
}

impl From<ValidationErrors> for WepServerError {
    fn from(errors: ValidationErrors) -> Self {
        WepServerError::Validation(errors)
    }
}

impl From<BuildError> for WepServerError {
    fn from(error: BuildError) -> Self {
        WepServerError::BadRequest(error.to_string())
    }
}

impl From<ShaclError> for WepServerError {
    fn from(error: ShaclError) -> Self {
        match error {
            ShaclError::Syntax(_) => WepServerError::BadRequest(error.to_string()),
            error => WepServerError::Internal(error.into()),
        }
    }
}

impl From<JsonRejection> for WepServerError {
    fn from(rejection: JsonRejection) -> Self {
        WepServerError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for WepServerError {
    fn from(rejection: QueryRejection) -> Self {
        WepServerError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for WepServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            WepServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            WepServerError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "errors": errors.fields() }),
            ),
            WepServerError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            WepServerError::ContentNegotiation(msg) => {
                (StatusCode::NOT_ACCEPTABLE, json!({ "error": msg }))
            }
            WepServerError::Store(e @ StoreError::UnsupportedFormat(_)) => {
                (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() }))
            }
            WepServerError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }),
            ),
            WepServerError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
