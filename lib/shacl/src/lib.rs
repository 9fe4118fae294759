//! SHACL validation of article records.
//!
//! The shapes describe the records `wep-mapper` writes: a `schema:NewsArticle` with its required
//! properties, and the `schema:Person` it names as author. [`validate`] checks
//! a data graph against them and returns a [`ValidationReport`] that can be rendered as a
//! `sh:ValidationReport` graph.
//!
//! Only the constraint components the shapes use are supported: `sh:minCount`, `sh:maxCount`,
//! `sh:datatype`, `sh:nodeKind sh:IRI` and `sh:in`.

mod error;
mod shapes;
mod turtle;
mod validation;
pub mod vocab;

pub use error::ShaclError;
pub use shapes::{
    article_shapes, shapes_graph, shapes_turtle, Constraint, NodeShape, PropertyShape,
    SHAPES_NAMESPACE,
};
pub use turtle::{parse_turtle, to_turtle};
pub use validation::{validate, validate_turtle, ValidationReport, ValidationResult};
