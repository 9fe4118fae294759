use crate::criteria::{parse_iri, Condition, Criteria, Criterion, Field, Value};
use crate::error::BuildError;
use crate::render::{prologue, string_literal};
use chrono::{DateTime, Utc};
use wep_model::vocab::{ARTICLE_PREFIXES, SCHEMA};
use wep_model::{Language, NamedNode, UriScheme};

pub const DEFAULT_LIST_LIMIT: u32 = 50;
pub const MAX_LIST_LIMIT: u32 = 1000;
pub const SEARCH_LIMIT: u32 = 20;
pub const RECOMMENDATION_LIMIT: u32 = 5;

/// The validated subject IRI of an article.
pub fn article_node(uris: &UriScheme, id: &str) -> Result<NamedNode, BuildError> {
    parse_iri(&uris.article(id))
}

/// Every stored field of one article. Yields at most one solution.
pub fn article_by_id(uris: &UriScheme, id: &str) -> Result<String, BuildError> {
    let subject = article_node(uris, id)?;
    Ok(format!(
        "{}SELECT ?title ?content ?author ?date ?modified ?language ?contentType ?description ?wordCount ?url ?license ?source
WHERE {{
  {subject} a schema:NewsArticle ;
    schema:headline ?title ;
    schema:articleBody ?content ;
    schema:author ?authorUri ;
    schema:datePublished ?date ;
    schema:inLanguage ?language ;
    schema:description ?description ;
    schema:url ?url .
  ?authorUri schema:name ?author .
{languages}  OPTIONAL {{ {subject} schema:wordCount ?wordCount }}
  OPTIONAL {{ {subject} schema:encodingFormat ?contentType }}
  OPTIONAL {{ {subject} dcterms:modified ?modified }}
  OPTIONAL {{ {subject} dcterms:rights ?license }}
  OPTIONAL {{ {subject} dcterms:provenance ?source }}
}}
LIMIT 1
",
        prologue(&ARTICLE_PREFIXES),
        languages = known_languages(),
    ))
}

/// Filters of the article listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub language: Option<Language>,
    /// Case-insensitive substring of the title or the description.
    pub topic: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

impl ArticleFilter {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT)
    }

    fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::new();
        if let Some(language) = self.language {
            criteria.push(Criterion::equals(
                Field::Language,
                Value::text(language.as_str()),
            ));
        }
        if let Some(topic) = self.topic.as_deref().filter(|t| !t.is_empty()) {
            criteria.push(Condition::Any(vec![
                Criterion::contains(Field::Title, topic),
                Criterion::contains(Field::Description, topic),
            ]));
        }
        if let Some(since) = self.since {
            criteria.push(Criterion::after(Field::Date, since));
        }
        if let Some(until) = self.until {
            criteria.push(Criterion::before(Field::Date, until));
        }
        criteria
    }
}

/// Article summaries, newest first.
pub fn list_articles(uris: &UriScheme, filter: &ArticleFilter) -> String {
    summaries(uris, "", "", &filter.criteria(), filter.limit())
}

/// Articles whose title, body or author name contains `term`.
pub fn search_articles(uris: &UriScheme, term: &str, language: Option<Language>) -> String {
    let mut criteria = Criteria::new().with(Condition::Any(vec![
        Criterion::contains(Field::Title, term),
        Criterion::contains(Field::Content, term),
        Criterion::contains(Field::Author, term),
    ]));
    if let Some(language) = language {
        criteria.push(Criterion::equals(
            Field::Language,
            Value::text(language.as_str()),
        ));
    }
    summaries(
        uris,
        "",
        "    schema:articleBody ?content ;\n",
        &criteria,
        SEARCH_LIMIT,
    )
}

/// Other articles sharing a `schema:keywords` or `schema:about` value with the article, newest
/// first.
pub fn article_recommendations(uris: &UriScheme, id: &str) -> Result<String, BuildError> {
    let subject = article_node(uris, id)?;
    let context = format!(
        "  VALUES ?link {{ schema:keywords schema:about }}
  {subject} ?link ?shared .
  ?article ?link ?shared .
  FILTER(?article != {subject})
"
    );
    Ok(summaries(
        uris,
        &context,
        "",
        &Criteria::new(),
        RECOMMENDATION_LIMIT,
    ))
}

/// `context` is matched before the article patterns, `extra_patterns` extends the article's own
/// pattern list.
fn summaries(
    uris: &UriScheme,
    context: &str,
    extra_patterns: &str,
    criteria: &Criteria,
    limit: u32,
) -> String {
    let namespace = string_literal(&uris.article_namespace());
    format!(
        "{}SELECT DISTINCT ?id ?title ?author ?date ?language ?description
WHERE {{
{context}  ?article a schema:NewsArticle ;
    schema:headline ?title ;
{extra_patterns}    schema:author ?authorUri ;
    schema:datePublished ?date ;
    schema:inLanguage ?language ;
    schema:description ?description .
  ?authorUri schema:name ?author .
  FILTER(STRSTARTS(STR(?article), {namespace}))
  BIND(STRAFTER(STR(?article), {namespace}) AS ?id)
{languages}{criteria}}}
ORDER BY DESC(?date)
LIMIT {limit}
",
        prologue(&ARTICLE_PREFIXES),
        languages = known_languages(),
    )
}

/// Every `?property ?value` pair of the article subject.
/// Subjects stored with a language code outside [`Language::ALL`] are not articles.
fn known_languages() -> String {
    let codes = Language::ALL
        .iter()
        .map(|language| string_literal(language.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("  FILTER(?language IN ({codes}))\n")
}

pub fn article_properties(uris: &UriScheme, id: &str) -> Result<String, BuildError> {
    let subject = article_node(uris, id)?;
    Ok(format!(
        "{}SELECT ?property ?value
WHERE {{
  {subject} ?property ?value .
}}
",
        prologue(&[SCHEMA])
    ))
}
