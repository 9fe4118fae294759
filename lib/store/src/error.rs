use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SPARQL query failed with status {status}: {body}")]
    QueryFailed { status: u16, body: String },
    #[error("SPARQL update failed with status {status}: {body}")]
    UpdateFailed { status: u16, body: String },
    #[error("Upload failed with status {status}: {body}")]
    UploadFailed { status: u16, body: String },
    #[error("Triple store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Could not reach the triple store: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not read query results: {0}")]
    InvalidResults(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Embedded store error: {0}")]
    Embedded(String),
}
