use thiserror::Error;

/// A value that cannot be rendered into a SPARQL query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Invalid IRI <{iri}>: {message}")]
    InvalidIri { iri: String, message: String },
    #[error("Invalid date-time '{0}', expected an ISO-8601 date or date-time")]
    InvalidDateTime(String),
}
