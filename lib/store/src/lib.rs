//! The store gateway: runs SPARQL queries and updates against a triple store.
//!
//! [`FusekiStore`] talks to an Apache Jena Fuseki dataset over the SPARQL 1.1 protocol
//! (`{base}/{dataset}/query`, `/update` and `/data`). [`MemoryStore`] implements the same
//! [`TripleStore`] contract on top of an embedded in-memory Oxigraph store.

mod config;
mod error;
mod fuseki;
mod memory;
mod results;

pub use config::{StoreConfig, DEFAULT_DATASET, DEFAULT_FUSEKI_URL};
pub use error::StoreError;
pub use fuseki::FusekiStore;
pub use memory::MemoryStore;
pub use results::{
    ResultsDocument, ResultsFormat, Solution, RDF_XML, SPARQL_RESULTS_JSON, SPARQL_RESULTS_XML,
    TURTLE,
};
pub use reqwest::Url;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The liveness report of a triple store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHealth {
    pub status: String,
    pub fuseki: String,
    pub endpoint: String,
    pub dataset: String,
}

impl StoreHealth {
    pub fn connected(endpoint: &str, dataset: &str) -> Self {
        Self {
            status: "ok".to_owned(),
            fuseki: "connected".to_owned(),
            endpoint: endpoint.to_owned(),
            dataset: dataset.to_owned(),
        }
    }
}

/// A SPARQL 1.1 endpoint with query, update and graph store capabilities.
#[async_trait]
pub trait TripleStore: Send + Sync {
    /// Evaluates a query and returns the raw results document in (or close to) `format`.
    async fn query(&self, query: &str, format: ResultsFormat)
        -> Result<ResultsDocument, StoreError>;

    /// Applies a SPARQL update request. All operations of the request succeed or fail together.
    async fn update(&self, update: &str) -> Result<(), StoreError>;

    /// Adds an RDF document of the given media type to the default graph.
    async fn upload(&self, data: Vec<u8>, content_type: &str) -> Result<(), StoreError>;

    /// Fails with [`StoreError::StoreUnavailable`] when the store cannot be reached.
    async fn health(&self) -> Result<StoreHealth, StoreError>;
}
