use crate::error::WepServerError;
use crate::AppState;
use anyhow::anyhow;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use headers::HeaderMapExt;
use headers_accept::Accept;
use mediatype::names::{APPLICATION, JSON, TEXT, TURTLE};
use mediatype::{MediaType, Name};
use wep_store::ResultsFormat;

/// Picks the results format of a pass-through query from its `Accept` header. Without one, the
/// store answers in SPARQL results JSON.
impl FromRequestParts<AppState> for ResultsFormat {
    type Rejection = WepServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        static OFFERED: [MediaType<'_>; 4] = [
            MediaType::new(APPLICATION, Name::new_unchecked("sparql-results+json")),
            MediaType::new(APPLICATION, JSON),
            MediaType::new(APPLICATION, Name::new_unchecked("rdf+xml")),
            MediaType::new(TEXT, TURTLE),
        ];

        let Some(accept) = parts.headers.typed_get::<Accept>() else {
            return Ok(ResultsFormat::Json);
        };
        let chosen = accept.negotiate(&OFFERED).ok_or_else(|| {
            WepServerError::ContentNegotiation(
                "Results are available as application/sparql-results+json, application/rdf+xml \
                 or text/turtle."
                    .to_owned(),
            )
        })?;
        ResultsFormat::from_media_type(&chosen.to_string())
            .ok_or_else(|| WepServerError::Internal(anyhow!("No results format for {chosen}")))
    }
}
