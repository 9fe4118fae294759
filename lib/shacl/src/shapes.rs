use crate::vocab as sh;
use crate::{to_turtle, ShaclError};
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNode, Graph, Literal, LiteralRef, NamedNode, NamedNodeRef, Term, TripleRef};
use wep_model::vocab::{dc, dcterms, schema, DC, DCTERMS, RDF, SCHEMA, SH, XSD};
use wep_model::{ContentType, Language};

pub const SHAPES_NAMESPACE: &str = "http://news-provenance.org/shapes#";

/// A constraint component attached to a property shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    MinCount(usize),
    MaxCount(usize),
    Datatype(NamedNodeRef<'static>),
    /// `sh:nodeKind sh:IRI`
    IriNodeKind,
    /// `sh:in`, restricted to plain string literals.
    In(Vec<&'static str>),
}

impl Constraint {
    /// The `sh:sourceConstraintComponent` of a result produced by this constraint.
    pub fn component(&self) -> NamedNodeRef<'static> {
        match self {
            Constraint::MinCount(_) => sh::MIN_COUNT_COMPONENT,
            Constraint::MaxCount(_) => sh::MAX_COUNT_COMPONENT,
            Constraint::Datatype(_) => sh::DATATYPE_COMPONENT,
            Constraint::IriNodeKind => sh::NODE_KIND_COMPONENT,
            Constraint::In(_) => sh::IN_COMPONENT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PropertyShape {
    pub path: NamedNodeRef<'static>,
    pub constraints: Vec<Constraint>,
}

impl PropertyShape {
    fn new(path: NamedNodeRef<'static>) -> Self {
        Self {
            path,
            constraints: Vec::new(),
        }
    }

    fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn required(self) -> Self {
        self.with(Constraint::MinCount(1))
    }

    fn single(self) -> Self {
        self.with(Constraint::MaxCount(1))
    }

    fn string(self) -> Self {
        self.with(Constraint::Datatype(xsd::STRING))
    }

    fn date_time(self) -> Self {
        self.with(Constraint::Datatype(xsd::DATE_TIME))
    }

    fn iri(self) -> Self {
        self.with(Constraint::IriNodeKind)
    }

    /// The last segment of the path IRI, e.g. `headline`.
    pub fn local_name(&self) -> &'static str {
        let path = self.path.as_str();
        path.rsplit(['/', '#']).next().unwrap_or(path)
    }
}

#[derive(Clone, Debug)]
pub struct NodeShape {
    pub name: &'static str,
    pub target_class: NamedNodeRef<'static>,
    pub properties: Vec<PropertyShape>,
}

impl NodeShape {
    pub fn iri(&self) -> NamedNode {
        NamedNode::new_unchecked(format!("{SHAPES_NAMESPACE}{}", self.name))
    }

    pub fn property_iri(&self, property: &PropertyShape) -> NamedNode {
        NamedNode::new_unchecked(format!(
            "{SHAPES_NAMESPACE}{}-{}",
            self.name,
            property.local_name()
        ))
    }
}

/// The shapes every stored article record is expected to satisfy.
pub fn article_shapes() -> Vec<NodeShape> {
    let languages = Language::ALL.into_iter().map(Language::as_str).collect();
    let content_types = ContentType::ALL
        .into_iter()
        .map(ContentType::as_str)
        .collect();
    vec![
        NodeShape {
            name: "NewsArticleShape",
            target_class: schema::NEWS_ARTICLE,
            properties: vec![
                PropertyShape::new(schema::HEADLINE).required().single().string(),
                PropertyShape::new(schema::ARTICLE_BODY).required().single().string(),
                PropertyShape::new(schema::AUTHOR).required().single().iri(),
                PropertyShape::new(schema::DATE_PUBLISHED)
                    .required()
                    .single()
                    .date_time(),
                PropertyShape::new(schema::IN_LANGUAGE)
                    .required()
                    .single()
                    .with(Constraint::In(languages)),
                PropertyShape::new(schema::DESCRIPTION).single().string(),
                PropertyShape::new(schema::URL).single().iri(),
                PropertyShape::new(schema::WORD_COUNT)
                    .single()
                    .with(Constraint::Datatype(xsd::INTEGER)),
                PropertyShape::new(schema::ENCODING_FORMAT)
                    .single()
                    .with(Constraint::In(content_types)),
                PropertyShape::new(dc::CREATOR).string(),
                PropertyShape::new(dcterms::CREATED).single().date_time(),
                PropertyShape::new(dcterms::MODIFIED).single().date_time(),
                PropertyShape::new(dcterms::RIGHTS).single().string(),
                PropertyShape::new(dcterms::PROVENANCE).single().string(),
            ],
        },
        NodeShape {
            name: "PersonShape",
            target_class: schema::PERSON,
            properties: vec![PropertyShape::new(schema::NAME).required().string()],
        },
    ]
}

/// Writes `shapes` as a SHACL shapes graph.
pub fn shapes_graph(shapes: &[NodeShape]) -> Graph {
    let mut graph = Graph::new();
    for shape in shapes {
        let node = shape.iri();
        graph.insert(TripleRef::new(&node, rdf::TYPE, sh::NODE_SHAPE));
        graph.insert(TripleRef::new(&node, sh::TARGET_CLASS, shape.target_class));
        for property in &shape.properties {
            let property_node = shape.property_iri(property);
            graph.insert(TripleRef::new(&node, sh::PROPERTY, &property_node));
            graph.insert(TripleRef::new(&property_node, rdf::TYPE, sh::PROPERTY_SHAPE));
            graph.insert(TripleRef::new(&property_node, sh::PATH, property.path));
            graph.insert(TripleRef::new(
                &property_node,
                sh::NAME,
                LiteralRef::new_simple_literal(property.local_name()),
            ));
            for constraint in &property.constraints {
                insert_constraint(&mut graph, &property_node, constraint);
            }
        }
    }
    graph
}

/// The article shapes as a Turtle document.
pub fn shapes_turtle() -> Result<String, ShaclError> {
    to_turtle(
        &shapes_graph(&article_shapes()),
        &[SH, SCHEMA, DC, DCTERMS, XSD, RDF],
    )
}

fn insert_constraint(graph: &mut Graph, property: &NamedNode, constraint: &Constraint) {
    match constraint {
        Constraint::MinCount(min) => {
            graph.insert(TripleRef::new(property, sh::MIN_COUNT, &integer(*min)));
        }
        Constraint::MaxCount(max) => {
            graph.insert(TripleRef::new(property, sh::MAX_COUNT, &integer(*max)));
        }
        Constraint::Datatype(datatype) => {
            graph.insert(TripleRef::new(property, sh::DATATYPE, *datatype));
        }
        Constraint::IriNodeKind => {
            graph.insert(TripleRef::new(property, sh::NODE_KIND, sh::IRI));
        }
        Constraint::In(values) => {
            let list = insert_list(graph, values);
            graph.insert(TripleRef::new(property, sh::IN, &list));
        }
    }
}

/// Writes an RDF collection of plain literals and returns its head.
fn insert_list(graph: &mut Graph, values: &[&str]) -> Term {
    let mut rest = Term::from(rdf::NIL.into_owned());
    for value in values.iter().rev() {
        let cell = BlankNode::default();
        graph.insert(TripleRef::new(
            &cell,
            rdf::FIRST,
            LiteralRef::new_simple_literal(value),
        ));
        graph.insert(TripleRef::new(&cell, rdf::REST, &rest));
        rest = cell.into();
    }
    rest
}

fn integer(value: usize) -> Literal {
    Literal::new_typed_literal(value.to_string(), xsd::INTEGER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_turtle;
    use oxrdf::{SubjectRef, TermRef};

    fn list_values(graph: &Graph, head: TermRef<'_>) -> Vec<String> {
        let mut values = Vec::new();
        let mut cell = head;
        while let TermRef::BlankNode(node) = cell {
            let subject = SubjectRef::from(node);
            if let Some(TermRef::Literal(value)) =
                graph.object_for_subject_predicate(subject, rdf::FIRST)
            {
                values.push(value.value().to_owned());
            }
            cell = graph
                .object_for_subject_predicate(subject, rdf::REST)
                .unwrap();
        }
        assert_eq!(cell, TermRef::from(rdf::NIL));
        values
    }

    #[test]
    fn article_shape_targets_news_articles() {
        let shapes = article_shapes();
        let graph = shapes_graph(&shapes);
        let article = NamedNode::new_unchecked("http://news-provenance.org/shapes#NewsArticleShape");
        assert!(graph.contains(TripleRef::new(&article, rdf::TYPE, sh::NODE_SHAPE)));
        assert!(graph.contains(TripleRef::new(
            &article,
            sh::TARGET_CLASS,
            schema::NEWS_ARTICLE
        )));
        assert_eq!(
            graph.objects_for_subject_predicate(&article, sh::PROPERTY).count(),
            shapes[0].properties.len()
        );

        let headline =
            NamedNode::new_unchecked("http://news-provenance.org/shapes#NewsArticleShape-headline");
        assert!(graph.contains(TripleRef::new(&headline, sh::PATH, schema::HEADLINE)));
        assert!(graph.contains(TripleRef::new(&headline, sh::MIN_COUNT, &integer(1))));
        assert!(graph.contains(TripleRef::new(&headline, sh::DATATYPE, xsd::STRING)));
    }

    #[test]
    fn allowed_languages_are_an_rdf_list() {
        let graph = shapes_graph(&article_shapes());
        let language =
            NamedNode::new_unchecked("http://news-provenance.org/shapes#NewsArticleShape-inLanguage");
        let head = graph
            .object_for_subject_predicate(&language, sh::IN)
            .unwrap();
        assert_eq!(list_values(&graph, head), ["en", "ro", "es", "fr", "de"]);
    }

    #[test]
    fn dublin_core_paths_keep_distinct_shape_names() {
        let shape = &article_shapes()[0];
        let names: Vec<_> = shape.properties.iter().map(PropertyShape::local_name).collect();
        assert!(names.contains(&"creator"));
        assert!(names.contains(&"created"));
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn shapes_turtle_parses_back() {
        let turtle = shapes_turtle().unwrap();
        assert!(turtle.contains("@prefix sh: <http://www.w3.org/ns/shacl#> ."));
        assert!(turtle.contains("sh:targetClass schema:NewsArticle"));
        assert_eq!(
            parse_turtle(&turtle).unwrap().len(),
            shapes_graph(&article_shapes()).len()
        );
    }
}
