use std::sync::Arc;
use wep_model::UriScheme;
use wep_store::TripleStore;

/// Upper bound for request bodies, RDF uploads included.
pub const MAX_BODY_SIZE: usize = 1024 * 1024 * 128; // 128MB

pub const DEFAULT_BIND: &str = "localhost:3000";

/// Holds the configuration for a WeP web server.
pub struct ServerConfig {
    /// The triple store that owns all data.
    pub store: Arc<dyn TripleStore>,
    /// Mints article and author URIs.
    pub uris: UriScheme,
    /// The IP address or DNS name and port that the socket binds to.
    pub bind: String,
    /// Whether CORS is enabled.
    pub cors: bool,
}
