use crate::ShaclError;
use oxrdf::Graph;
use oxttl::{TurtleParser, TurtleSerializer};
use wep_model::vocab::Prefix;

/// Parses a Turtle document into a graph.
pub fn parse_turtle(data: &str) -> Result<Graph, ShaclError> {
    let mut graph = Graph::new();
    for triple in TurtleParser::new().for_slice(data.as_bytes()) {
        graph.insert(&triple?);
    }
    Ok(graph)
}

/// Serializes a graph as Turtle, abbreviating IRIs with `prefixes`.
pub fn to_turtle(graph: &Graph, prefixes: &[Prefix]) -> Result<String, ShaclError> {
    let mut serializer = TurtleSerializer::new();
    for prefix in prefixes {
        serializer = serializer.with_prefix(prefix.name, prefix.iri)?;
    }
    let mut writer = serializer.for_writer(Vec::new());
    for triple in graph {
        writer.serialize_triple(triple)?;
    }
    Ok(String::from_utf8_lossy(&writer.finish()?).into_owned())
}
