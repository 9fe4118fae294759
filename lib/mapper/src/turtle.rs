use crate::escape::escape_literal;
use crate::resolved::ResolvedArticle;
use chrono::{DateTime, Utc};
use wep_model::vocab::ARTICLE_PREFIXES;
use wep_model::{Article, UriScheme};

pub const DEFAULT_RIGHTS: &str = "CC BY 4.0";
pub const DEFAULT_PROVENANCE: &str = "Original";

/// Serializes an article, and the author it names, as a Turtle document.
pub fn to_turtle(article: &Article, uris: &UriScheme) -> String {
    to_turtle_at(article, uris, Utc::now())
}

/// Like [`to_turtle`], with `now` standing in for absent timestamps.
pub fn to_turtle_at(article: &Article, uris: &UriScheme, now: DateTime<Utc>) -> String {
    let r = ResolvedArticle::new(article, uris, now);

    let article_block = SubjectBlock {
        subject: iri(&r.article_uri),
        types: "schema:NewsArticle, schema:CreativeWork",
        predicates: vec![
            ("schema:headline", literal(&article.title)),
            ("schema:articleBody", literal(&article.content)),
            ("schema:author", iri(&r.author_uri)),
            ("schema:datePublished", date_time(&r.created)),
            ("schema:inLanguage", literal(article.language.as_str())),
            ("schema:description", literal(r.description)),
            ("schema:url", iri(&r.url)),
            ("schema:wordCount", integer(r.word_count)),
            ("schema:encodingFormat", literal(article.content_type.as_str())),
            ("dc:creator", literal(&article.author)),
            ("dcterms:created", date_time(&r.created)),
            ("dcterms:modified", date_time(&r.modified)),
            (
                "dcterms:rights",
                literal(article.license.as_deref().unwrap_or(DEFAULT_RIGHTS)),
            ),
            (
                "dcterms:provenance",
                literal(article.source.as_deref().unwrap_or(DEFAULT_PROVENANCE)),
            ),
        ],
    };
    let author_block = SubjectBlock {
        subject: iri(&r.author_uri),
        types: "schema:Person",
        predicates: vec![("schema:name", literal(&article.author))],
    };

    let mut lines: Vec<String> = ARTICLE_PREFIXES.iter().map(|p| p.turtle()).collect();
    lines.push(String::new());
    article_block.write_to(&mut lines);
    lines.push(String::new());
    author_block.write_to(&mut lines);

    let mut document = lines.join("\n");
    document.push('\n');
    document
}

/// `<subject> a <types> ; p1 o1 ; ... pn on .`
struct SubjectBlock<'a> {
    subject: String,
    types: &'a str,
    predicates: Vec<(&'a str, String)>,
}

impl SubjectBlock<'_> {
    fn write_to(&self, lines: &mut Vec<String>) {
        let terminator = |i: usize| if i + 1 == self.predicates.len() { "." } else { ";" };
        if self.predicates.is_empty() {
            lines.push(format!("{} a {} .", self.subject, self.types));
            return;
        }
        lines.push(format!("{} a {} ;", self.subject, self.types));
        for (i, (predicate, object)) in self.predicates.iter().enumerate() {
            lines.push(format!("    {predicate} {object} {}", terminator(i)));
        }
    }
}

fn literal(value: &str) -> String {
    format!("\"{}\"", escape_literal(value))
}

fn iri(value: &str) -> String {
    format!("<{value}>")
}

fn date_time(value: &str) -> String {
    format!("\"{value}\"^^xsd:dateTime")
}

fn integer(value: u64) -> String {
    format!("\"{value}\"^^xsd:integer")
}
