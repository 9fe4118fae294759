mod article;
mod error;
pub mod timestamp;
mod uri;
pub mod vocab;

pub use article::*;
pub use error::*;
pub use uri::*;

// Re-export the oxrdf types that appear in our public API.
pub use oxrdf::{IriParseError, NamedNode, NamedNodeRef};
