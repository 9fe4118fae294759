use crate::error::StoreError;
use oxrdf::Term;
use sparesults::{
    QueryResultsFormat, QueryResultsParser, QuerySolution, ReaderQueryResultsParserOutput,
};

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";
pub const SPARQL_RESULTS_XML: &str = "application/sparql-results+xml";
pub const RDF_XML: &str = "application/rdf+xml";
pub const TURTLE: &str = "text/turtle";

/// The representation requested from the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultsFormat {
    /// SPARQL results JSON for `SELECT`/`ASK`.
    #[default]
    Json,
    /// RDF/XML for `CONSTRUCT`/`DESCRIBE`.
    RdfXml,
    Turtle,
}

impl ResultsFormat {
    /// The `Accept` header sent to the store.
    pub fn media_type(self) -> &'static str {
        match self {
            ResultsFormat::Json => SPARQL_RESULTS_JSON,
            ResultsFormat::RdfXml => RDF_XML,
            ResultsFormat::Turtle => TURTLE,
        }
    }

    /// Parses the `format` field of a query request.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(ResultsFormat::Json),
            "xml" | "rdfxml" | "rdf/xml" => Some(ResultsFormat::RdfXml),
            "turtle" | "ttl" => Some(ResultsFormat::Turtle),
            _ => None,
        }
    }

    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            SPARQL_RESULTS_JSON | "application/json" => Some(ResultsFormat::Json),
            RDF_XML => Some(ResultsFormat::RdfXml),
            TURTLE => Some(ResultsFormat::Turtle),
            _ => None,
        }
    }
}

/// A response body of the store together with its content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsDocument {
    pub format: ResultsFormat,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl ResultsDocument {
    pub fn new(format: ResultsFormat, content_type: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            format,
            content_type: content_type.into(),
            body,
        }
    }

    pub fn is_json(&self) -> bool {
        essence(&self.content_type) == SPARQL_RESULTS_JSON
            || essence(&self.content_type) == "application/json"
    }

    /// The body as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value, StoreError> {
        serde_json::from_slice(&self.body).map_err(|e| StoreError::InvalidResults(e.to_string()))
    }

    /// Parses a SPARQL results JSON body into its solutions.
    pub fn solutions(&self) -> Result<Vec<Solution>, StoreError> {
        if !self.is_json() {
            return Err(StoreError::UnsupportedFormat(self.content_type.clone()));
        }
        let invalid = |e: sparesults::QueryResultsParseError| StoreError::InvalidResults(e.to_string());
        match QueryResultsParser::from_format(QueryResultsFormat::Json)
            .for_reader(self.body.as_slice())
            .map_err(invalid)?
        {
            ReaderQueryResultsParserOutput::Solutions(solutions) => solutions
                .map(|solution| solution.map(Solution).map_err(invalid))
                .collect(),
            ReaderQueryResultsParserOutput::Boolean(_) => Err(StoreError::InvalidResults(
                "expected solutions, got a boolean".to_owned(),
            )),
        }
    }
}

fn essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

/// One row of a `SELECT` result.
#[derive(Debug)]
pub struct Solution(QuerySolution);

impl Solution {
    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.0.get(variable)
    }

    /// The lexical value of a binding: the IRI, the blank node id or the literal value.
    pub fn get_str(&self, variable: &str) -> Option<&str> {
        let term = self.get(variable)?;
        if let Term::Literal(literal) = term {
            Some(literal.value())
        } else if let Term::NamedNode(node) = term {
            Some(node.as_str())
        } else if let Term::BlankNode(node) = term {
            Some(node.as_str())
        } else {
            None
        }
    }

    pub fn get_u64(&self, variable: &str) -> Option<u64> {
        self.get_str(variable)?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
      "head": { "vars": ["title", "author", "count"] },
      "results": { "bindings": [
        {
          "title": { "type": "literal", "value": "Hello" },
          "author": { "type": "uri", "value": "http://news-provenance.org/author/A" },
          "count": { "type": "literal", "datatype": "http://www.w3.org/2001/XMLSchema#integer", "value": "3" }
        },
        { "title": { "type": "literal", "value": "Untitled", "xml:lang": "en" } }
      ] }
    }"#;

    #[test]
    fn parses_solutions() {
        let document = ResultsDocument::new(
            ResultsFormat::Json,
            "application/sparql-results+json; charset=utf-8",
            BODY.as_bytes().to_vec(),
        );
        let solutions = document.solutions().unwrap();
        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].get_str("title"), Some("Hello"));
        assert_eq!(
            solutions[0].get_str("author"),
            Some("http://news-provenance.org/author/A")
        );
        assert_eq!(solutions[0].get_u64("count"), Some(3));
        assert_eq!(solutions[1].get_str("title"), Some("Untitled"));
        assert_eq!(solutions[1].get_str("author"), None);
    }

    #[test]
    fn rejects_non_json() {
        let document = ResultsDocument::new(ResultsFormat::RdfXml, RDF_XML, b"<rdf:RDF/>".to_vec());
        assert!(matches!(
            document.solutions(),
            Err(StoreError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn format_names() {
        assert_eq!(ResultsFormat::from_name("JSON"), Some(ResultsFormat::Json));
        assert_eq!(ResultsFormat::from_name("xml"), Some(ResultsFormat::RdfXml));
        assert_eq!(ResultsFormat::from_name("csv"), None);
        assert_eq!(ResultsFormat::RdfXml.media_type(), "application/rdf+xml");
    }
}
