use crate::shapes::{article_shapes, Constraint, NodeShape};
use crate::vocab as sh;
use crate::{parse_turtle, ShaclError};
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{
    BlankNode, Graph, Literal, NamedNode, NamedNodeRef, Subject, Term, TermRef, TripleRef,
};
use serde::{Serialize, Serializer};
use std::fmt::Write;

/// One violation of a constraint on a focus node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub focus_node: Subject,
    pub result_path: NamedNode,
    /// The offending value, absent for cardinality violations.
    pub value: Option<Term>,
    pub source_shape: NamedNode,
    pub source_constraint_component: NamedNode,
    pub message: String,
}

/// Serialized with plain IRIs and literal values, e.g. `{"focusNode": "http://...", ...}`.
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResultView {
            focus_node: lexical(self.focus_node.as_ref().into()),
            result_path: self.result_path.as_str(),
            value: self.value.as_ref().map(|value| lexical(value.as_ref())),
            source_shape: self.source_shape.as_str(),
            source_constraint_component: self.source_constraint_component.as_str(),
            severity: "Violation",
            message: &self.message,
        }
        .serialize(serializer)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultView<'a> {
    focus_node: String,
    result_path: &'a str,
    value: Option<String>,
    source_shape: &'a str,
    source_constraint_component: &'a str,
    severity: &'static str,
    message: &'a str,
}

fn lexical(term: TermRef<'_>) -> String {
    match term {
        TermRef::NamedNode(node) => node.as_str().to_owned(),
        TermRef::Literal(literal) => literal.value().to_owned(),
        other => other.to_string(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn conforms(&self) -> bool {
        self.results.is_empty()
    }

    /// The report as a `sh:ValidationReport` graph.
    pub fn to_graph(&self) -> Graph {
        let mut graph = Graph::new();
        let report = BlankNode::default();
        graph.insert(TripleRef::new(&report, rdf::TYPE, sh::VALIDATION_REPORT));
        graph.insert(TripleRef::new(
            &report,
            sh::CONFORMS,
            &Literal::from(self.conforms()),
        ));
        for result in &self.results {
            let node = BlankNode::default();
            graph.insert(TripleRef::new(&report, sh::RESULT, &node));
            graph.insert(TripleRef::new(&node, rdf::TYPE, sh::VALIDATION_RESULT));
            graph.insert(TripleRef::new(&node, sh::FOCUS_NODE, result.focus_node.as_ref()));
            graph.insert(TripleRef::new(&node, sh::RESULT_PATH, &result.result_path));
            if let Some(value) = &result.value {
                graph.insert(TripleRef::new(&node, sh::VALUE, value));
            }
            graph.insert(TripleRef::new(&node, sh::SOURCE_SHAPE, &result.source_shape));
            graph.insert(TripleRef::new(
                &node,
                sh::SOURCE_CONSTRAINT_COMPONENT,
                &result.source_constraint_component,
            ));
            graph.insert(TripleRef::new(&node, sh::RESULT_SEVERITY, sh::VIOLATION));
            graph.insert(TripleRef::new(
                &node,
                sh::RESULT_MESSAGE,
                &Literal::new_simple_literal(&result.message),
            ));
        }
        graph
    }

    /// A plain text summary, one block per result.
    pub fn text(&self) -> String {
        let mut text = String::from("Validation Report\n");
        let _ = writeln!(text, "Conforms: {}", self.conforms());
        if self.conforms() {
            return text;
        }
        let _ = writeln!(text, "Results ({}):", self.results.len());
        for result in &self.results {
            let _ = writeln!(
                text,
                "Constraint Violation in {}:",
                result.source_constraint_component
            );
            let _ = writeln!(text, "\tSource Shape: {}", result.source_shape);
            let _ = writeln!(text, "\tFocus Node: {}", result.focus_node);
            if let Some(value) = &result.value {
                let _ = writeln!(text, "\tValue Node: {value}");
            }
            let _ = writeln!(text, "\tResult Path: {}", result.result_path);
            let _ = writeln!(text, "\tMessage: {}", result.message);
        }
        text
    }
}

/// Validates every instance of each shape's target class in `data`.
pub fn validate(data: &Graph, shapes: &[NodeShape]) -> ValidationReport {
    let mut results = Vec::new();
    for shape in shapes {
        for focus in data.subjects_for_predicate_object(rdf::TYPE, shape.target_class) {
            for property in &shape.properties {
                let values: Vec<TermRef<'_>> = data
                    .objects_for_subject_predicate(focus, property.path)
                    .collect();
                for constraint in &property.constraints {
                    for (value, message) in violations(constraint, &values) {
                        results.push(ValidationResult {
                            focus_node: focus.into_owned(),
                            result_path: property.path.into_owned(),
                            value: value.map(TermRef::into_owned),
                            source_shape: shape.property_iri(property),
                            source_constraint_component: constraint.component().into_owned(),
                            message,
                        });
                    }
                }
            }
        }
    }
    ValidationReport { results }
}

/// Parses a Turtle document and validates it against the article shapes.
pub fn validate_turtle(data: &str) -> Result<ValidationReport, ShaclError> {
    Ok(validate(&parse_turtle(data)?, &article_shapes()))
}

fn violations<'a>(
    constraint: &Constraint,
    values: &[TermRef<'a>],
) -> Vec<(Option<TermRef<'a>>, String)> {
    match constraint {
        Constraint::MinCount(min) if values.len() < *min => {
            vec![(None, format!("Less than {min} values"))]
        }
        Constraint::MaxCount(max) if values.len() > *max => {
            vec![(None, format!("More than {max} values"))]
        }
        Constraint::MinCount(_) | Constraint::MaxCount(_) => Vec::new(),
        Constraint::Datatype(datatype) => values
            .iter()
            .filter(|value| !has_datatype(**value, *datatype))
            .map(|value| (Some(*value), format!("Value is not a literal of datatype {datatype}")))
            .collect(),
        Constraint::IriNodeKind => values
            .iter()
            .filter(|value| !matches!(value, TermRef::NamedNode(_)))
            .map(|value| (Some(*value), "Value is not an IRI".to_owned()))
            .collect(),
        Constraint::In(allowed) => values
            .iter()
            .filter(|value| !is_member(**value, allowed))
            .map(|value| {
                (
                    Some(*value),
                    format!("Value is not one of {}", allowed.join(", ")),
                )
            })
            .collect(),
    }
}

fn has_datatype(value: TermRef<'_>, datatype: NamedNodeRef<'_>) -> bool {
    let TermRef::Literal(literal) = value else {
        return false;
    };
    if literal.datatype() != datatype {
        return false;
    }
    // Only integer lexical forms are checked.
    datatype != xsd::INTEGER || literal.value().parse::<i64>().is_ok()
}

fn is_member(value: TermRef<'_>, allowed: &[&str]) -> bool {
    matches!(value, TermRef::Literal(literal)
        if literal.datatype() == xsd::STRING && allowed.iter().any(|a| *a == literal.value()))
}
