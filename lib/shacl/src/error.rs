use oxrdf::IriParseError;
use oxttl::TurtleSyntaxError;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ShaclError {
    #[error("Invalid Turtle: {0}")]
    Syntax(#[from] TurtleSyntaxError),
    #[error("Invalid prefix IRI: {0}")]
    Prefix(#[from] IriParseError),
    #[error("Could not serialize the graph: {0}")]
    Serialize(#[from] io::Error),
}
