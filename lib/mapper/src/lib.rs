//! Pure functions that turn an [`Article`](wep_model::Article) into one of its three
//! serializations: [Turtle](to_turtle), [JSON-LD](to_json_ld) and [RDFa](to_rdfa).
//!
//! All three formats are derived from the same resolved view of the article, so derived fields
//! (word count, description, url, timestamps) always agree between them. Timestamps that are not
//! set on the article default to the current time; use the `*_at` variants to pin that time.

mod escape;
mod jsonld;
mod rdfa;
mod resolved;
mod turtle;

pub use escape::{escape_html, escape_literal};
pub use jsonld::{to_json_ld, to_json_ld_at, PUBLISHER_NAME};
pub use rdfa::{to_rdfa, to_rdfa_at};
pub use turtle::{to_turtle, to_turtle_at, DEFAULT_PROVENANCE, DEFAULT_RIGHTS};
