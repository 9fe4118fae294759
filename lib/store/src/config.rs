use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_FUSEKI_URL: &str = "http://localhost:3030";
pub const DEFAULT_DATASET: &str = "news-provenance";

/// Where the Fuseki dataset lives. Built once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: Url,
    pub dataset: String,
    /// Per-request timeout. `None` waits as long as the transport does.
    pub timeout: Option<Duration>,
}

impl StoreConfig {
    pub fn new(base_url: Url, dataset: impl Into<String>) -> Self {
        Self {
            base_url,
            dataset: dataset.into(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn query_endpoint(&self) -> String {
        self.dataset_endpoint("query")
    }

    pub fn update_endpoint(&self) -> String {
        self.dataset_endpoint("update")
    }

    /// The Graph Store Protocol endpoint of the default graph.
    pub fn data_endpoint(&self) -> String {
        self.dataset_endpoint("data")
    }

    /// Fuseki's liveness endpoint.
    pub fn ping_endpoint(&self) -> String {
        format!("{}/$/ping", self.base())
    }

    fn dataset_endpoint(&self, service: &str) -> String {
        format!("{}/{}/{service}", self.base(), self.dataset)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        #[allow(clippy::expect_used, reason = "constant URL")]
        let base_url = Url::parse(DEFAULT_FUSEKI_URL).expect("valid default URL");
        Self::new(base_url, DEFAULT_DATASET)
    }
}
