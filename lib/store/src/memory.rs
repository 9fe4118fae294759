use crate::error::StoreError;
use crate::results::{
    ResultsDocument, ResultsFormat, RDF_XML, SPARQL_RESULTS_JSON, SPARQL_RESULTS_XML, TURTLE,
};
use crate::{StoreHealth, TripleStore};
use async_trait::async_trait;
use oxigraph::io::RdfFormat;
use oxigraph::sparql::results::QueryResultsFormat;
use oxigraph::sparql::{EvaluationError, QueryResults};
use oxigraph::store::Store;
use tracing::debug;

/// An embedded, in-memory SPARQL store with the same contract as [`FusekiStore`](crate::FusekiStore).
///
/// Used for local development without a Fuseki instance, and in tests.
#[derive(Clone)]
pub struct MemoryStore {
    store: Store,
    dataset: String,
}

impl MemoryStore {
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            store: Store::new().map_err(|e| StoreError::Embedded(e.to_string()))?,
            dataset: "memory".to_owned(),
        })
    }

    /// The number of quads currently stored.
    pub fn len(&self) -> Result<usize, StoreError> {
        self.store
            .len()
            .map_err(|e| StoreError::Embedded(e.to_string()))
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|len| len == 0)
    }

    fn evaluate(&self, query: &str, format: ResultsFormat) -> Result<ResultsDocument, StoreError> {
        let results = self.store.query(query).map_err(query_failed)?;
        let (content_type, body) = if matches!(results, QueryResults::Graph(_)) {
            let (content_type, rdf_format) = match format {
                ResultsFormat::Turtle => (TURTLE, RdfFormat::Turtle),
                ResultsFormat::Json | ResultsFormat::RdfXml => (RDF_XML, RdfFormat::RdfXml),
            };
            let body = results
                .write_graph(Vec::new(), rdf_format)
                .map_err(query_failed)?;
            (content_type, body)
        } else {
            let (content_type, results_format) = match format {
                ResultsFormat::Json => (SPARQL_RESULTS_JSON, QueryResultsFormat::Json),
                ResultsFormat::RdfXml | ResultsFormat::Turtle => {
                    (SPARQL_RESULTS_XML, QueryResultsFormat::Xml)
                }
            };
            let body = results
                .write(Vec::new(), results_format)
                .map_err(query_failed)?;
            (content_type, body)
        };
        Ok(ResultsDocument::new(format, content_type, body))
    }
}

/// Syntax errors map to the status Fuseki answers them with.
fn status_of(error: &EvaluationError) -> u16 {
    if matches!(error, EvaluationError::Parsing(_)) {
        400
    } else {
        500
    }
}

fn query_failed(error: EvaluationError) -> StoreError {
    StoreError::QueryFailed {
        status: status_of(&error),
        body: error.to_string(),
    }
}

fn update_failed(error: EvaluationError) -> StoreError {
    StoreError::UpdateFailed {
        status: status_of(&error),
        body: error.to_string(),
    }
}

#[async_trait]
impl TripleStore for MemoryStore {
    async fn query(
        &self,
        query: &str,
        format: ResultsFormat,
    ) -> Result<ResultsDocument, StoreError> {
        debug!("Evaluating SPARQL query in memory:\n{query}");
        self.evaluate(query, format)
    }

    async fn update(&self, update: &str) -> Result<(), StoreError> {
        debug!("Evaluating SPARQL update in memory:\n{update}");
        self.store.update(update).map_err(update_failed)
    }

    async fn upload(&self, data: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        debug!("Loading {} bytes of {content_type} in memory", data.len());
        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        let format = RdfFormat::from_media_type(media_type)
            .ok_or_else(|| StoreError::UnsupportedFormat(content_type.to_owned()))?;
        self.store
            .load_from_reader(format, data.as_slice())
            .map_err(|e| StoreError::UploadFailed {
                status: 400,
                body: e.to_string(),
            })
    }

    async fn health(&self) -> Result<StoreHealth, StoreError> {
        Ok(StoreHealth {
            status: "ok".to_owned(),
            fuseki: "in-memory".to_owned(),
            endpoint: "memory:".to_owned(),
            dataset: self.dataset.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"
        @prefix schema: <http://schema.org/> .
        <http://example.org/a> a schema:NewsArticle ; schema:headline "A" .
        <http://example.org/b> a schema:NewsArticle ; schema:headline "B" .
    "#;

    #[tokio::test]
    async fn upload_then_query() {
        let store = MemoryStore::new().unwrap();
        store
            .upload(DATA.as_bytes().to_vec(), "text/turtle; charset=utf-8")
            .await
            .unwrap();
        assert_eq!(store.len().unwrap(), 4);

        let document = store
            .query(
                "SELECT ?title WHERE { ?a <http://schema.org/headline> ?title } ORDER BY ?title",
                ResultsFormat::Json,
            )
            .await
            .unwrap();
        let titles: Vec<_> = document
            .solutions()
            .unwrap()
            .iter()
            .map(|s| s.get_str("title").unwrap().to_owned())
            .collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[tokio::test]
    async fn update_and_errors() {
        let store = MemoryStore::new().unwrap();
        store
            .update("INSERT DATA { <http://e.org/s> <http://e.org/p> \"o\" }")
            .await
            .unwrap();
        store
            .update("DELETE WHERE { <http://e.org/s> ?p ?o . }")
            .await
            .unwrap();
        assert!(store.is_empty().unwrap());

        assert!(matches!(
            store.update("INSERT NONSENSE").await,
            Err(StoreError::UpdateFailed { status: 400, .. })
        ));
        assert!(matches!(
            store.query("SELEKT", ResultsFormat::Json).await,
            Err(StoreError::QueryFailed { status: 400, .. })
        ));
        assert!(matches!(
            store.upload(b"x".to_vec(), "application/x-unknown").await,
            Err(StoreError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn graph_queries_use_rdf_formats() {
        let store = MemoryStore::new().unwrap();
        store.upload(DATA.as_bytes().to_vec(), "text/turtle").await.unwrap();
        let document = store
            .query("CONSTRUCT WHERE { ?s ?p ?o }", ResultsFormat::RdfXml)
            .await
            .unwrap();
        assert_eq!(document.content_type, RDF_XML);
        assert!(String::from_utf8(document.body).unwrap().contains("rdf:RDF"));
    }
}
