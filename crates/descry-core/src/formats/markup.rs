//! RDFa-flavored link extraction from HTML, XHTML, SVG and Atom markup.
//!
//! A full RDFa processor is out of scope; discovery only needs the link
//! arcs a descriptor announcement can live in. This reader scans the
//! document with a lenient XML pull parser and emits triples for:
//!
//! - `<link>`, `<a>`, `<area>` elements carrying `rel` + `href` (HTML,
//!   XHTML, and Atom's `<link>` share this shape)
//! - any element carrying RDFa `rel` + `resource`
//! - any element carrying RDFa `property` + `content` (literal arcs, so a
//!   self-describing page is recognizable as such)
//!
//! The configured predicate tokens are honored inside `rel` attributes in
//! addition to absolute IRIs, which is what lets a page say
//! `rel="describedby"` without registering an RDFa keyword. Relation
//! tokens that match nothing in the predicate set are dropped.

use crate::config::PredicateSet;
use crate::graph::{Graph, Term};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;
use url::Url;

/// Extracts link triples from a markup document.
///
/// Returns `None` when the document is so broken that nothing could be
/// scanned out of it; an error midway through keeps whatever was already
/// collected.
#[must_use]
pub fn parse(body: &str, base: &str, predicates: &PredicateSet) -> Option<Graph> {
    let mut reader = Reader::from_str(body);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.trim_text(true);

    let mut graph = Graph::new();
    let mut base_iri = base.to_string();
    let mut clean_finish = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
                if name == "base" {
                    if let Some(href) = attribute(&e, "href") {
                        base_iri = resolve(&base_iri, &href);
                    }
                } else {
                    collect_element(&e, &base_iri, predicates, &mut graph);
                }
            },
            Ok(Event::Eof) => {
                clean_finish = true;
                break;
            },
            Err(e) => {
                debug!(error = %e, "markup scan stopped early");
                break;
            },
            Ok(_) => {},
        }
        buf.clear();
    }

    if clean_finish || !graph.is_empty() {
        Some(graph)
    } else {
        None
    }
}

/// Emits the triples one element contributes.
fn collect_element(
    element: &BytesStart<'_>,
    base: &str,
    predicates: &PredicateSet,
    graph: &mut Graph,
) {
    let subject = attribute(element, "about")
        .map_or_else(|| base.to_string(), |about| resolve(base, &about));

    if let Some(rel) = attribute(element, "rel") {
        // href on link/a/area, resource on RDFa-annotated elements
        let target = attribute(element, "href").or_else(|| attribute(element, "resource"));
        if let Some(target) = target {
            let object = resolve(base, &target);
            for token in rel.split_ascii_whitespace() {
                if let Some(predicate) = expand_rel(token, predicates) {
                    graph.add_triple(
                        Term::iri(subject.clone()),
                        predicate,
                        Term::iri(object.clone()),
                    );
                }
            }
        }
    }

    if let Some(property) = attribute(element, "property") {
        if let Some(content) = attribute(element, "content") {
            for token in property.split_ascii_whitespace() {
                if let Some(predicate) = expand_rel(token, predicates) {
                    graph.add_triple(
                        Term::iri(subject.clone()),
                        predicate,
                        Term::literal(content.clone()),
                    );
                }
            }
        }
    }
}

/// Reads one attribute value leniently (HTML rules, unquoted allowed).
fn attribute(element: &BytesStart<'_>, name: &str) -> Option<String> {
    element.html_attributes().with_checks(false).find_map(|a| {
        let a = a.ok()?;
        if a.key.local_name().as_ref().eq_ignore_ascii_case(name.as_bytes()) {
            a.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

/// Maps a rel/property token to a predicate IRI.
///
/// Configured predicates match by token or IRI; other absolute IRIs pass
/// through; anything else (`stylesheet`, unregistered keywords) is noise.
fn expand_rel(token: &str, predicates: &PredicateSet) -> Option<String> {
    if let Some(predicate) = predicates.match_rel(token) {
        return Some(predicate.uri().to_string());
    }
    if token.contains("://") {
        return Some(token.to_string());
    }
    None
}

fn resolve(base: &str, target: &str) -> String {
    if target.contains("://") {
        return target.to_string();
    }
    if let Ok(base) = Url::parse(base) {
        if let Ok(resolved) = base.join(target) {
            return resolved.to_string();
        }
    }
    target.to_string()
}
