//! Namespaces used by the article and provenance graphs.

use oxrdf::NamedNodeRef;

/// A namespace prefix binding, e.g. `schema:` → `http://schema.org/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prefix {
    pub name: &'static str,
    pub iri: &'static str,
}

impl Prefix {
    pub const fn new(name: &'static str, iri: &'static str) -> Self {
        Self { name, iri }
    }

    /// The Turtle form: `@prefix schema: <http://schema.org/> .`
    pub fn turtle(&self) -> String {
        format!("@prefix {}: <{}> .", self.name, self.iri)
    }

    /// The SPARQL form: `PREFIX schema: <http://schema.org/>`
    pub fn sparql(&self) -> String {
        format!("PREFIX {}: <{}>", self.name, self.iri)
    }
}

pub const SCHEMA: Prefix = Prefix::new("schema", "http://schema.org/");
pub const DC: Prefix = Prefix::new("dc", "http://purl.org/dc/elements/1.1/");
pub const DCTERMS: Prefix = Prefix::new("dcterms", "http://purl.org/dc/terms/");
pub const XSD: Prefix = Prefix::new("xsd", "http://www.w3.org/2001/XMLSchema#");
pub const PROV: Prefix = Prefix::new("prov", "http://www.w3.org/ns/prov#");
pub const FOAF: Prefix = Prefix::new("foaf", "http://xmlns.com/foaf/0.1/");
pub const RDF: Prefix = Prefix::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const SH: Prefix = Prefix::new("sh", "http://www.w3.org/ns/shacl#");

/// The prefixes an article record is serialized with.
pub const ARTICLE_PREFIXES: [Prefix; 4] = [SCHEMA, DC, DCTERMS, XSD];

/// The prefixes used by the PROV-O browsing queries.
pub const PROVENANCE_PREFIXES: [Prefix; 4] = [PROV, DCTERMS, FOAF, RDF];

/// Schema.org vocabulary root, used as the RDFa `vocab` and the JSON-LD `@context`.
pub const SCHEMA_ORG: &str = "http://schema.org/";

pub mod schema {
    //! [Schema.org](https://schema.org/) terms of an article record.
    use super::NamedNodeRef;

    pub const NEWS_ARTICLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/NewsArticle");
    pub const PERSON: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org/Person");
    pub const HEADLINE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/headline");
    pub const ARTICLE_BODY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/articleBody");
    pub const AUTHOR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org/author");
    pub const NAME: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org/name");
    pub const DATE_PUBLISHED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/datePublished");
    pub const IN_LANGUAGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/inLanguage");
    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/description");
    pub const URL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org/url");
    pub const WORD_COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/wordCount");
    pub const ENCODING_FORMAT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/encodingFormat");
}

pub mod dc {
    //! [Dublin Core](http://purl.org/dc/elements/1.1/) elements.
    use super::NamedNodeRef;

    pub const CREATOR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/creator");
}

pub mod dcterms {
    //! [DCMI Metadata Terms](http://purl.org/dc/terms/).
    use super::NamedNodeRef;

    pub const CREATED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/created");
    pub const MODIFIED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/modified");
    pub const RIGHTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/rights");
    pub const PROVENANCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/provenance");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_forms() {
        assert_eq!(SCHEMA.turtle(), "@prefix schema: <http://schema.org/> .");
        assert_eq!(
            XSD.sparql(),
            "PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>"
        );
    }

    #[test]
    fn terms_live_in_their_namespace() {
        assert!(schema::HEADLINE.as_str().starts_with(SCHEMA.iri));
        assert!(dc::CREATOR.as_str().starts_with(DC.iri));
        assert!(dcterms::PROVENANCE.as_str().starts_with(DCTERMS.iri));
        assert!(schema::PERSON.as_str().starts_with(SCHEMA_ORG));
    }
}
