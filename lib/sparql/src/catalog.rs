//! Named example queries with `{{TOPIC}}` and `{{DATE}}` placeholders.

use crate::criteria::parse_date_time;
use crate::error::BuildError;
use crate::render::date_time_literal;
use chrono::{DateTime, Utc};
use wep_mapper::escape_literal;

const TOPIC: &str = "{{TOPIC}}";
const DATE: &str = "\"{{DATE}}\"^^xsd:dateTime";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredefinedQuery {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// The query text with its placeholders still in place.
    pub template: &'static str,
}

/// Values for the placeholders of a [`PredefinedQuery`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub topic: Option<String>,
    pub date: Option<String>,
}

impl PredefinedQuery {
    /// Substitutes the placeholders. The topic lands inside a string literal and is escaped, the
    /// date must parse and defaults to the Unix epoch.
    pub fn render(&self, params: &QueryParams) -> Result<String, BuildError> {
        let date = match params.date.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(date) => parse_date_time(date)?,
            None => DateTime::<Utc>::UNIX_EPOCH,
        };
        let topic = escape_literal(params.topic.as_deref().unwrap_or_default());
        Ok(self
            .template
            .replace(TOPIC, &topic)
            .replace(DATE, &date_time_literal(&date)))
    }
}

const CATALOG: [PredefinedQuery; 5] = [
    PredefinedQuery {
        key: "freshEditorials",
        name: "Fresh Editorials on Specific Topic",
        description: "List recent editorials about a specific topic",
        template: r#"PREFIX schema: <http://schema.org/>
PREFIX dc: <http://purl.org/dc/elements/1.1/>
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>

SELECT ?title ?author ?date ?url
WHERE {
  ?article a schema:NewsArticle ;
           schema:headline ?title ;
           schema:author ?author ;
           schema:datePublished ?date ;
           schema:url ?url ;
           schema:articleSection "Editorial" ;
           schema:about ?topic .
  FILTER(CONTAINS(LCASE(STR(?topic)), LCASE("{{TOPIC}}")))
  FILTER(?date > "{{DATE}}"^^xsd:dateTime)
}
ORDER BY DESC(?date)
LIMIT 20"#,
    },
    PredefinedQuery {
        key: "shortArticlesInLanguages",
        name: "Short Articles in English or Spanish",
        description: "Articles under 4000 words in English or Spanish about IT contests",
        template: r#"PREFIX schema: <http://schema.org/>
PREFIX dc: <http://purl.org/dc/elements/1.1/>

SELECT ?title ?wordCount ?language ?description
WHERE {
  ?article a schema:NewsArticle ;
           schema:headline ?title ;
           schema:wordCount ?wordCount ;
           schema:inLanguage ?language ;
           schema:description ?description ;
           schema:about ?topic .
  FILTER(?wordCount < 4000)
  FILTER(?language = "en" || ?language = "es")
  FILTER(CONTAINS(LCASE(STR(?topic)), "it contest") ||
         CONTAINS(LCASE(STR(?topic)), "programming competition"))
}
ORDER BY ?wordCount"#,
    },
    PredefinedQuery {
        key: "romanianInvestigations",
        name: "Romanian Journalists Investigations",
        description: "Investigations and documentaries by Romanian journalists",
        template: r#"PREFIX schema: <http://schema.org/>
PREFIX dc: <http://purl.org/dc/elements/1.1/>

SELECT ?title ?description ?author ?date ?url
WHERE {
  ?article a schema:NewsArticle ;
           schema:headline ?title ;
           schema:description ?description ;
           schema:author ?author ;
           schema:datePublished ?date ;
           schema:url ?url ;
           schema:inLanguage "ro" .
  ?article schema:genre ?genre .
  FILTER(?genre = "Investigation" || ?genre = "Documentary")
  FILTER(CONTAINS(LCASE(STR(?author)), "romanian") ||
         CONTAINS(LCASE(STR(?url)), ".ro"))
}
ORDER BY DESC(?date)"#,
    },
    PredefinedQuery {
        key: "articlesByTopic",
        name: "Articles by Topic",
        description: "Find all articles about a specific topic",
        template: r#"PREFIX schema: <http://schema.org/>
PREFIX dc: <http://purl.org/dc/elements/1.1/>

SELECT ?title ?author ?date ?description
WHERE {
  ?article a schema:NewsArticle ;
           schema:headline ?title ;
           schema:author ?author ;
           schema:datePublished ?date ;
           schema:description ?description ;
           schema:about ?topic .
  FILTER(CONTAINS(LCASE(STR(?topic)), LCASE("{{TOPIC}}")))
}
ORDER BY DESC(?date)
LIMIT 50"#,
    },
    PredefinedQuery {
        key: "multimediaContent",
        name: "Multimedia Content",
        description: "Articles with multimedia content (images, audio, video)",
        template: r#"PREFIX schema: <http://schema.org/>

SELECT ?title ?contentType ?url ?thumbnail
WHERE {
  ?article a schema:NewsArticle ;
           schema:headline ?title ;
           schema:url ?url .
  {
    ?article schema:image ?thumbnail .
    BIND("image" AS ?contentType)
  } UNION {
    ?article schema:audio ?audio .
    BIND("audio" AS ?contentType)
  } UNION {
    ?article schema:video ?video .
    BIND("video" AS ?contentType)
  }
}
ORDER BY ?title"#,
    },
];

/// Older clients execute the short-articles query under this name.
const ALIASES: [(&str, &str); 1] = [("shortArticles", "shortArticlesInLanguages")];

/// All predefined queries, in listing order.
pub fn catalog() -> &'static [PredefinedQuery] {
    &CATALOG
}

/// Looks up a query by key or alias.
pub fn find(name: &str) -> Option<&'static PredefinedQuery> {
    let key = ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, key)| *key);
    CATALOG.iter().find(|query| query.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spargebra::Query;

    #[test]
    fn every_rendered_query_parses() {
        let params = QueryParams {
            topic: Some("climate".to_owned()),
            date: Some("2024-01-01".to_owned()),
        };
        for query in catalog() {
            let rendered = query.render(&params).unwrap();
            assert!(!rendered.contains("{{"), "{}", query.key);
            Query::parse(&rendered, None).unwrap_or_else(|e| panic!("{}: {e}", query.key));
        }
    }

    #[test]
    fn substitutes_escaped_topic_and_normalized_date() {
        let rendered = find("freshEditorials")
            .unwrap()
            .render(&QueryParams {
                topic: Some("\"x\") || true || (\"".to_owned()),
                date: Some("2024-03-01T10:00:00Z".to_owned()),
            })
            .unwrap();
        assert!(rendered.contains(r#"LCASE("\"x\") || true || (\"")"#));
        assert!(rendered.contains(r#"?date > "2024-03-01T10:00:00.000Z"^^xsd:dateTime"#));
        Query::parse(&rendered, None).unwrap();
    }

    #[test]
    fn missing_params_use_defaults() {
        let rendered = find("freshEditorials")
            .unwrap()
            .render(&QueryParams::default())
            .unwrap();
        assert!(rendered.contains(r#"LCASE("")"#));
        assert!(rendered.contains(r#""1970-01-01T00:00:00.000Z"^^xsd:dateTime"#));
    }

    #[test]
    fn rejects_bad_dates() {
        let result = find("freshEditorials").unwrap().render(&QueryParams {
            topic: None,
            date: Some("\"^^xsd:string) }".to_owned()),
        });
        assert!(matches!(result, Err(BuildError::InvalidDateTime(_))));
    }

    #[test]
    fn resolves_alias_and_unknown_names() {
        assert_eq!(find("shortArticles").unwrap().key, "shortArticlesInLanguages");
        assert_eq!(find("articlesByTopic").unwrap().key, "articlesByTopic");
        assert!(find("dropEverything").is_none());
    }

    #[test]
    fn listing_keeps_placeholders() {
        assert!(find("articlesByTopic").unwrap().template.contains("{{TOPIC}}"));
    }
}
