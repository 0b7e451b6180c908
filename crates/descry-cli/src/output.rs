//! Plain and JSON renderings of discovery results.

use descry_core::{Graph, Term, Triple};
use serde_json::json;

/// Prints discovered URIs, one per line or as a JSON array.
pub fn print_uris(uris: &[String], json: bool) {
    if json {
        println!("{}", json!(uris));
    } else {
        for uri in uris {
            println!("{uri}");
        }
    }
}

/// Prints a graph as N-Triples lines or as a JSON triple array.
pub fn print_graph(graph: &Graph, json: bool) {
    if json {
        let triples: Vec<_> = graph.iter().map(triple_json).collect();
        println!("{}", json!(triples));
    } else {
        for triple in graph.iter() {
            println!("{triple}");
        }
    }
}

fn triple_json(triple: &Triple) -> serde_json::Value {
    json!({
        "subject": triple.subject.lexical(),
        "predicate": triple.predicate,
        "object": match &triple.object {
            Term::Iri(iri) => json!({ "type": "uri", "value": iri }),
            Term::Literal { value, datatype } => json!({
                "type": "literal",
                "value": value,
                "datatype": datatype,
            }),
        },
    })
}
