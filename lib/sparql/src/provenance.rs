//! Browsing queries over PROV-O data uploaded by users.
//!
//! The data follows no schema beyond the `prov:Entity`, `prov:Activity` and `prov:Agent` types, so
//! labels are picked up from whichever of `dcterms:title`, `foaf:name` or `foaf:givenName` exists.

use crate::criteria::{parse_iri, Condition, Criterion, Field};
use crate::error::BuildError;
use crate::articles::article_node;
use crate::render::prologue;
use wep_model::vocab::{FOAF, PROV, PROVENANCE_PREFIXES, SCHEMA};
use wep_model::UriScheme;

const BROWSE_LIMIT: u32 = 100;
const GRAPH_LIMIT: u32 = 500;
const SEARCH_LIMIT: u32 = 50;
const RECOMMENDATION_LIMIT: u32 = 20;

/// The PROV relations drawn as edges of the provenance graph.
pub const RELATIONS: [&str; 8] = [
    "prov:used",
    "prov:wasGeneratedBy",
    "prov:wasAssociatedWith",
    "prov:wasAttributedTo",
    "prov:wasDerivedFrom",
    "prov:wasRevisionOf",
    "prov:alternateOf",
    "prov:actedOnBehalfOf",
];

fn with_prologue(body: &str) -> String {
    format!("{}{body}", prologue(&PROVENANCE_PREFIXES))
}

pub fn entities() -> String {
    with_prologue(&format!(
        "SELECT DISTINCT ?entity ?title ?type
WHERE {{
  ?entity rdf:type prov:Entity .
  OPTIONAL {{ ?entity dcterms:title ?title }}
  OPTIONAL {{ ?entity rdf:type ?type FILTER(?type != prov:Entity) }}
}}
LIMIT {BROWSE_LIMIT}
"
    ))
}

pub fn activities() -> String {
    with_prologue(&format!(
        "SELECT DISTINCT ?activity ?startTime ?endTime
WHERE {{
  ?activity rdf:type prov:Activity .
  OPTIONAL {{ ?activity prov:startedAtTime ?startTime }}
  OPTIONAL {{ ?activity prov:endedAtTime ?endTime }}
}}
LIMIT {BROWSE_LIMIT}
"
    ))
}

pub fn agents() -> String {
    with_prologue(&format!(
        "SELECT DISTINCT ?agent ?name ?email ?type
WHERE {{
  ?agent rdf:type prov:Agent .
  OPTIONAL {{ ?agent foaf:name ?name }}
  OPTIONAL {{ ?agent foaf:givenName ?name }}
  OPTIONAL {{ ?agent foaf:mbox ?email }}
  OPTIONAL {{ ?agent rdf:type ?type FILTER(?type != prov:Agent) }}
}}
LIMIT {BROWSE_LIMIT}
"
    ))
}

/// Edges between PROV-typed resources along the [`RELATIONS`].
pub fn provenance_graph() -> String {
    let relations = RELATIONS.join(", ");
    with_prologue(&format!(
        "SELECT ?subject ?subjectType ?predicate ?object ?objectType
WHERE {{
  ?subject rdf:type ?subjectType .
  ?subject ?predicate ?object .
  OPTIONAL {{ ?object rdf:type ?objectType }}
  FILTER(?subjectType IN (prov:Entity, prov:Activity, prov:Agent))
  FILTER(?predicate IN ({relations}))
}}
LIMIT {GRAPH_LIMIT}
"
    ))
}

/// All predicate/object pairs of `uri`.
pub fn resource(uri: &str) -> Result<String, BuildError> {
    let node = parse_iri(uri)?;
    Ok(with_prologue(&format!(
        "SELECT ?predicate ?object
WHERE {{
  {node} ?predicate ?object .
}}
"
    )))
}

/// PROV-typed resources whose IRI or label contains `term`.
pub fn search(term: &str) -> String {
    let filter = Condition::Any(vec![
        Criterion::contains(Field::Resource, term),
        Criterion::contains(Field::Label, term),
    ]);
    with_prologue(&format!(
        "SELECT DISTINCT ?resource ?type ?label
WHERE {{
  ?resource rdf:type ?type .
  OPTIONAL {{ ?resource dcterms:title ?label }}
  OPTIONAL {{ ?resource foaf:name ?label }}
  OPTIONAL {{ ?resource foaf:givenName ?label }}
  {filter}
  FILTER(?type IN (prov:Entity, prov:Activity, prov:Agent))
}}
LIMIT {SEARCH_LIMIT}
"
    ))
}

/// Resources derived from, revising, or alternate to `uri`, and the sources `uri` derives from.
pub fn recommendations(uri: &str) -> Result<String, BuildError> {
    let node = parse_iri(uri)?;
    Ok(with_prologue(&format!(
        "SELECT DISTINCT ?related ?relationship ?title
WHERE {{
  {{
    ?related prov:wasDerivedFrom {node} .
    BIND(\"derivedFrom\" AS ?relationship)
  }} UNION {{
    ?related prov:wasRevisionOf {node} .
    BIND(\"revisionOf\" AS ?relationship)
  }} UNION {{
    ?related prov:alternateOf {node} .
    BIND(\"alternateOf\" AS ?relationship)
  }} UNION {{
    {node} prov:wasDerivedFrom ?related .
    BIND(\"sourceFor\" AS ?relationship)
  }}
  OPTIONAL {{ ?related dcterms:title ?title }}
}}
LIMIT {RECOMMENDATION_LIMIT}
"
    )))
}

/// The activity that generated an article, the agent associated with it, and the sources the
/// article derives from. One row per agent and source combination; no rows without an activity.
pub fn article_chain(uris: &UriScheme, id: &str) -> Result<String, BuildError> {
    let subject = article_node(uris, id)?;
    Ok(format!(
        "{}SELECT ?activity ?startTime ?endTime ?agent ?agentName ?derivedFrom
WHERE {{
  {subject} prov:wasGeneratedBy ?activity .
  OPTIONAL {{ ?activity prov:startedAtTime ?startTime }}
  OPTIONAL {{ ?activity prov:endedAtTime ?endTime }}
  OPTIONAL {{
    ?activity prov:wasAssociatedWith ?agent .
    OPTIONAL {{ ?agent schema:name ?agentName }}
    OPTIONAL {{ ?agent foaf:name ?agentName }}
  }}
  OPTIONAL {{ {subject} prov:wasDerivedFrom ?derivedFrom }}
}}
",
        prologue(&[PROV, SCHEMA, FOAF])
    ))
}

/// Binds `?entities`, `?activities` and `?agents`.
pub fn stats() -> String {
    with_prologue(
        "SELECT (COUNT(DISTINCT ?entity) AS ?entities)
       (COUNT(DISTINCT ?activity) AS ?activities)
       (COUNT(DISTINCT ?agent) AS ?agents)
WHERE {
  { ?entity rdf:type prov:Entity }
  UNION { ?activity rdf:type prov:Activity }
  UNION { ?agent rdf:type prov:Agent }
}
",
    )
}
