//! SPARQL text for every read and write WeP performs.
//!
//! User-supplied values only enter a query through the [`criteria`] model or through validated
//! IRIs, and are rendered by a single serializer in [`render`].

pub mod articles;
pub mod catalog;
pub mod criteria;
mod error;
pub mod provenance;
pub mod render;
pub mod statistics;
pub mod update;

pub use articles::{
    article_by_id, article_node, article_properties, article_recommendations, list_articles,
    search_articles, ArticleFilter,
};
pub use catalog::{PredefinedQuery, QueryParams};
pub use criteria::{Condition, Criteria, Criterion, Field, Operator, Value};
pub use error::BuildError;
pub use update::{delete_article, insert_data, replace_article};
