use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::results::{ResultsDocument, ResultsFormat};
use crate::{StoreHealth, TripleStore};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use tracing::{debug, warn};

const SPARQL_QUERY: &str = "application/sparql-query";
const SPARQL_UPDATE: &str = "application/sparql-update";

/// A Fuseki dataset reached over the SPARQL 1.1 protocol. Every call is one HTTP round trip
/// without retries.
#[derive(Clone, Debug)]
pub struct FusekiStore {
    client: Client,
    config: StoreConfig,
}

impl FusekiStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// Splits a response into its status and body text when it is not a success.
async fn failure(response: Response) -> Option<(u16, String)> {
    let status = response.status();
    if status.is_success() {
        return None;
    }
    let body = response.text().await.unwrap_or_default();
    Some((status.as_u16(), body))
}

#[async_trait]
impl TripleStore for FusekiStore {
    async fn query(
        &self,
        query: &str,
        format: ResultsFormat,
    ) -> Result<ResultsDocument, StoreError> {
        let endpoint = self.config.query_endpoint();
        debug!("Issuing SPARQL query to {endpoint}:\n{query}");
        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, SPARQL_QUERY)
            .header(ACCEPT, format.media_type())
            .body(query.to_owned())
            .send()
            .await
            .inspect_err(|e| warn!("SPARQL query to {endpoint} failed: {e}"))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(format.media_type())
            .to_owned();
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("SPARQL query to {endpoint} returned {status}: {body}");
            return Err(StoreError::QueryFailed {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.bytes().await?;
        Ok(ResultsDocument::new(format, content_type, body.to_vec()))
    }

    async fn update(&self, update: &str) -> Result<(), StoreError> {
        let endpoint = self.config.update_endpoint();
        debug!("Issuing SPARQL update to {endpoint}:\n{update}");
        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, SPARQL_UPDATE)
            .body(update.to_owned())
            .send()
            .await
            .inspect_err(|e| warn!("SPARQL update to {endpoint} failed: {e}"))?;

        match failure(response).await {
            None => Ok(()),
            Some((status, body)) => {
                warn!("SPARQL update to {endpoint} returned {status}: {body}");
                Err(StoreError::UpdateFailed { status, body })
            }
        }
    }

    async fn upload(&self, data: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        let endpoint = self.config.data_endpoint();
        debug!("Uploading {} bytes of {content_type} to {endpoint}", data.len());
        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .inspect_err(|e| warn!("Upload to {endpoint} failed: {e}"))?;

        match failure(response).await {
            None => Ok(()),
            Some((status, body)) => {
                warn!("Upload to {endpoint} returned {status}: {body}");
                Err(StoreError::UploadFailed { status, body })
            }
        }
    }

    async fn health(&self) -> Result<StoreHealth, StoreError> {
        let endpoint = self.config.ping_endpoint();
        debug!("Pinging {endpoint}");
        let unavailable = |message: String| {
            warn!("Triple store at {endpoint} is unavailable: {message}");
            StoreError::StoreUnavailable(message)
        };
        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if let Some((status, _)) = failure(response).await {
            return Err(unavailable(format!("ping returned status {status}")));
        }
        Ok(StoreHealth::connected(
            self.config.base(),
            &self.config.dataset,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
    use axum::response::{IntoResponse, Response};
    use axum::Router;
    use reqwest::Url;
    use std::sync::{Arc, Mutex};

    /// What the fake Fuseki saw of one request.
    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Received {
        method: Method,
        path: String,
        content_type: Option<String>,
        accept: Option<String>,
        body: String,
    }

    type Journal = Arc<Mutex<Vec<Received>>>;

    /// Dataset `ok` answers every service, dataset `broken` fails every service, and the server
    /// mounted under `/down` fails its ping.
    async fn fake_fuseki(
        State(journal): State<Journal>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> Response {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        journal.lock().unwrap().push(Received {
            method,
            path: uri.path().to_owned(),
            content_type: header(CONTENT_TYPE),
            accept: header(ACCEPT),
            body,
        });
        match uri.path() {
            "/ok/query" => (
                [(CONTENT_TYPE, "application/sparql-results+json")],
                r#"{"head":{},"boolean":true}"#,
            )
                .into_response(),
            "/ok/update" => StatusCode::NO_CONTENT.into_response(),
            "/ok/data" | "/$/ping" => StatusCode::OK.into_response(),
            "/broken/query" => (StatusCode::BAD_REQUEST, "Parse error: SELEKT").into_response(),
            "/broken/update" => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Update aborted").into_response()
            }
            "/broken/data" => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unknown syntax").into_response()
            }
            _ => (StatusCode::SERVICE_UNAVAILABLE, "Down").into_response(),
        }
    }

    async fn start_fake_fuseki() -> (Url, Journal) {
        let journal = Journal::default();
        let app = Router::new()
            .fallback(fake_fuseki)
            .with_state(Arc::clone(&journal));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (Url::parse(&format!("http://{address}")).unwrap(), journal)
    }

    fn store(base_url: Url, dataset: &str) -> FusekiStore {
        FusekiStore::new(StoreConfig::new(base_url, dataset)).unwrap()
    }

    fn last(journal: &Journal) -> Received {
        journal.lock().unwrap().last().cloned().unwrap()
    }

    #[tokio::test]
    async fn query_sends_protocol_headers() {
        let (url, journal) = start_fake_fuseki().await;
        let store = store(url, "ok");

        let document = store.query("ASK {}", ResultsFormat::Json).await.unwrap();
        assert_eq!(document.content_type, "application/sparql-results+json");
        assert_eq!(document.to_json().unwrap()["boolean"], true);
        assert_eq!(
            last(&journal),
            Received {
                method: Method::POST,
                path: "/ok/query".to_owned(),
                content_type: Some("application/sparql-query".to_owned()),
                accept: Some("application/sparql-results+json".to_owned()),
                body: "ASK {}".to_owned(),
            }
        );

        for (format, accept) in [
            (ResultsFormat::RdfXml, "application/rdf+xml"),
            (ResultsFormat::Turtle, "text/turtle"),
        ] {
            store
                .query("CONSTRUCT WHERE { ?s ?p ?o }", format)
                .await
                .unwrap();
            assert_eq!(last(&journal).accept.as_deref(), Some(accept));
        }
    }

    #[tokio::test]
    async fn update_and_upload_send_their_media_types() {
        let (url, journal) = start_fake_fuseki().await;
        let store = store(url, "ok");

        store.update("CLEAR DEFAULT").await.unwrap();
        let update = last(&journal);
        assert_eq!(update.path, "/ok/update");
        assert_eq!(
            update.content_type.as_deref(),
            Some("application/sparql-update")
        );
        assert_eq!(update.body, "CLEAR DEFAULT");

        store
            .upload(b"<s> <p> <o> .".to_vec(), "application/n-triples")
            .await
            .unwrap();
        let upload = last(&journal);
        assert_eq!(upload.path, "/ok/data");
        assert_eq!(upload.content_type.as_deref(), Some("application/n-triples"));
        assert_eq!(upload.body, "<s> <p> <o> .");
    }

    #[tokio::test]
    async fn failures_carry_upstream_status_and_body() {
        let (url, _journal) = start_fake_fuseki().await;
        let store = store(url, "broken");

        assert!(matches!(
            store.query("SELEKT", ResultsFormat::Json).await,
            Err(StoreError::QueryFailed { status: 400, body }) if body == "Parse error: SELEKT"
        ));
        assert!(matches!(
            store.update("CLEAR DEFAULT").await,
            Err(StoreError::UpdateFailed { status: 500, body }) if body == "Update aborted"
        ));
        assert!(matches!(
            store.upload(b"x".to_vec(), "text/x").await,
            Err(StoreError::UploadFailed { status: 415, body }) if body == "Unknown syntax"
        ));
    }

    #[tokio::test]
    async fn health_pings_the_server() {
        let (url, journal) = start_fake_fuseki().await;

        let health = store(url.clone(), "ok").health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.fuseki, "connected");
        assert_eq!(health.dataset, "ok");
        let ping = last(&journal);
        assert_eq!(ping.method, Method::GET);
        assert_eq!(ping.path, "/$/ping");

        let down = url.join("down").unwrap();
        assert!(matches!(
            store(down, "ok").health().await,
            Err(StoreError::StoreUnavailable(_))
        ));
        assert_eq!(last(&journal).path, "/down/$/ping");
    }

    #[tokio::test]
    async fn unreachable_store_is_unavailable() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let store = store(Url::parse("http://127.0.0.1:9").unwrap(), "ds");
        assert!(matches!(
            store.health().await,
            Err(StoreError::StoreUnavailable(_))
        ));
        assert!(matches!(
            store.query("ASK {}", ResultsFormat::Json).await,
            Err(StoreError::Transport(_))
        ));
    }
}
