use crate::articles::article_node;
use crate::error::BuildError;
use crate::render::prologue;
use wep_model::vocab::ARTICLE_PREFIXES;
use wep_model::{NamedNode, UriScheme};

/// Drops the `@prefix` lines of a Turtle document. SPARQL Update does not accept them inside
/// `INSERT DATA`.
pub fn strip_prefix_lines(turtle: &str) -> String {
    turtle
        .lines()
        .filter(|line| !line.trim_start().starts_with("@prefix"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

/// Wraps the triples of a Turtle document produced by the mapper in `INSERT DATA`.
pub fn insert_data(turtle: &str) -> String {
    format!(
        "{}INSERT DATA {{\n{}\n}}\n",
        prologue(&ARTICLE_PREFIXES),
        strip_prefix_lines(turtle)
    )
}

/// Removes every triple whose subject is `subject`. Triples that only mention it as an object
/// are left alone.
pub fn delete_subject(subject: &NamedNode) -> String {
    format!("DELETE WHERE {{\n  {subject} ?p ?o .\n}}")
}

/// Replaces all triples of `subject` with the ones in `turtle`.
///
/// Both operations travel in one update request, which the store applies as a single
/// transaction: readers never observe the subject deleted but not yet reinserted.
pub fn replace_subject(subject: &NamedNode, turtle: &str) -> String {
    format!("{} ;\n{}", delete_subject(subject), insert_data(turtle))
}

pub fn delete_article(uris: &UriScheme, id: &str) -> Result<String, BuildError> {
    Ok(delete_subject(&article_node(uris, id)?))
}

pub fn replace_article(uris: &UriScheme, id: &str, turtle: &str) -> Result<String, BuildError> {
    Ok(replace_subject(&article_node(uris, id)?, turtle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spargebra::Update;
    use wep_mapper::to_turtle;
    use wep_model::ArticleInput;

    fn turtle() -> String {
        let article = ArticleInput {
            title: Some("Braces { and } \"quotes\"".to_owned()),
            content: Some("multi\nline\\content".to_owned()),
            author: Some("A. N. Other".to_owned()),
            language: Some("de".to_owned()),
            content_type: Some("video".to_owned()),
            ..ArticleInput::default()
        }
        .validate("u1")
        .unwrap();
        to_turtle(&article, &UriScheme::default())
    }

    fn parses(update: &str) -> Update {
        Update::parse(update, None).unwrap_or_else(|e| panic!("{e}\n{update}"))
    }

    #[test]
    fn strips_prefixes() {
        let stripped = strip_prefix_lines("@prefix a: <http://a/> .\n  @prefix b: <http://b/> .\n\n<s> <p> <o> .\n");
        assert_eq!(stripped, "<s> <p> <o> .");
    }

    #[test]
    fn insert_of_mapped_turtle_is_valid_update() {
        let update = insert_data(&turtle());
        assert!(update.starts_with("PREFIX schema: <http://schema.org/>\n"));
        assert!(!update.contains("@prefix"));
        let parsed = parses(&update);
        assert_eq!(parsed.operations.len(), 1);
    }

    #[test]
    fn delete_targets_subject_only() {
        let node = article_node(&UriScheme::default(), "u1").unwrap();
        let update = delete_subject(&node);
        assert_eq!(
            update,
            "DELETE WHERE {\n  <http://news-provenance.org/article/u1> ?p ?o .\n}"
        );
        parses(&update);
    }

    #[test]
    fn replace_is_one_request_with_two_operations() {
        let update = replace_article(&UriScheme::default(), "u1", &turtle()).unwrap();
        let parsed = parses(&update);
        assert_eq!(parsed.operations.len(), 2);
        assert!(update.starts_with("DELETE WHERE"));
    }

    #[test]
    fn invalid_ids_are_rejected() {
        assert!(delete_article(&UriScheme::default(), "x> ?p ?o } ; DROP ALL ; {").is_err());
    }
}
