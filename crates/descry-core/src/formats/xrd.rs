//! XRD descriptor reader.
//!
//! Parses XRD documents (including `/.well-known/host-meta`) into graph
//! triples. A `<Subject>` element overrides the caller-supplied subject;
//! each `<Link rel href>` becomes an IRI arc under the expanded relation,
//! and each `<Link rel template>` becomes a literal arc typed
//! `xrd:URITemplate`, which is what the template query in the discovery
//! chain looks for. `<Property>` and `<Alias>` elements carry nothing the
//! chain consumes and are skipped.

use crate::config::PredicateSet;
use crate::graph::{Graph, Term};
use crate::vocab;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

/// Parses an XRD document, with `subject` as the default subject IRI.
///
/// Returns `None` when the body is not well-formed XML or carries no XRD
/// root element.
#[must_use]
pub fn parse(body: &str, subject: &str, predicates: &PredicateSet) -> Option<Graph> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut saw_xrd_root = false;
    let mut subject = subject.to_string();
    let mut links: Vec<ParsedLink> = Vec::new();
    let mut in_subject = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                match local_name(&e).as_str() {
                    "XRD" => saw_xrd_root = true,
                    "Subject" => in_subject = true,
                    "Link" => links.extend(parsed_link(&e)),
                    _ => {},
                }
            },
            Ok(Event::Empty(e)) => {
                if local_name(&e) == "Link" {
                    links.extend(parsed_link(&e));
                }
            },
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"Subject" {
                    in_subject = false;
                }
            },
            Ok(Event::Text(e)) => {
                if in_subject {
                    if let Ok(text) = e.unescape() {
                        subject = text.trim().to_string();
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!(error = %e, "XRD parse failed");
                return None;
            },
            Ok(_) => {},
        }
        buf.clear();
    }

    if !saw_xrd_root {
        return None;
    }

    let mut graph = Graph::new();
    for link in links {
        let predicate = expand_rel(&link.rel, predicates);
        if let Some(href) = link.href {
            graph.add_triple(Term::iri(subject.clone()), predicate.clone(), Term::iri(href));
        }
        if let Some(template) = link.template {
            graph.add_triple(
                Term::iri(subject.clone()),
                predicate,
                Term::typed_literal(template, vocab::xrd::URI_TEMPLATE),
            );
        }
    }
    Some(graph)
}

struct ParsedLink {
    rel: String,
    href: Option<String>,
    template: Option<String>,
}

fn parsed_link(element: &BytesStart<'_>) -> Option<ParsedLink> {
    let mut rel = None;
    let mut href = None;
    let mut template = None;
    for attr in element.attributes().filter_map(Result::ok) {
        let value = attr.unescape_value().ok()?.into_owned();
        match attr.key.local_name().as_ref() {
            b"rel" => rel = Some(value),
            b"href" => href = Some(value),
            b"template" => template = Some(value),
            _ => {},
        }
    }
    // a Link without a relation or without any target is meaningless
    let rel = rel?;
    if href.is_none() && template.is_none() {
        return None;
    }
    Some(ParsedLink {
        rel,
        href,
        template,
    })
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Expands an XRD rel value to a predicate IRI.
///
/// A rel naming a configured predicate takes that predicate's IRI, so
/// short tokens like `describedby` line up with the relation form the
/// chain queries for; other short tokens go into the IANA relation
/// namespace, and absolute IRIs pass through.
fn expand_rel(rel: &str, predicates: &PredicateSet) -> String {
    if let Some(predicate) = predicates.match_rel(rel) {
        return predicate.uri().to_string();
    }
    if rel.contains("://") {
        rel.to_string()
    } else {
        format!("{}{}", vocab::iana::NS, rel.to_ascii_lowercase())
    }
}
