//! Content classification and delegated document parsers.
//!
//! The orchestrator treats every parser here as a capability: "parse this
//! body of content type T, relative to base URI B, into a graph". Each
//! parser answers with `Some(Graph)` or `None` ("not applicable" or
//! unparseable); no parser error ever escapes to the discovery chain.
//!
//! Three readers are provided:
//! - [`markup`] - RDFa-flavored link extraction from HTML, XHTML, SVG and
//!   Atom documents
//! - [`rdf`] - generic RDF: N-Triples, a Turtle subset, RDF/XML and
//!   RDF/JSON
//! - [`xrd`] - XRD descriptors, including host-meta documents

pub mod markup;
pub mod rdf;
pub mod xrd;

use crate::config::PredicateSet;
use crate::graph::Graph;

/// Broad content classes the discovery chain distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// RDFa-bearing markup: HTML, XHTML, SVG, Atom.
    Markup,
    /// A native RDF serialization.
    Rdf,
    /// An XRD descriptor document.
    Xrd,
    /// Anything else.
    Other,
}

impl Flavor {
    /// Classifies a media type (parameters already stripped).
    #[must_use]
    pub fn classify(content_type: &str) -> Self {
        match content_type {
            "text/html" | "application/xhtml+xml" | "image/svg+xml" | "application/atom+xml" => {
                Self::Markup
            },
            "application/rdf+xml"
            | "text/turtle"
            | "application/x-turtle"
            | "text/n3"
            | "text/rdf+n3"
            | "application/n-triples"
            | "application/rdf+json" => Self::Rdf,
            "application/xrd+xml" => Self::Xrd,
            _ => Self::Other,
        }
    }
}

/// Parses a fetched descriptor body, first applicable format wins.
///
/// Dispatch is by content type: markup formats go to the RDFa-flavored
/// extractor, RDF serializations to the generic RDF reader, XRD to the XRD
/// reader. Unrecognized content types get a trailing XRD attempt, since
/// host-meta style descriptors are frequently served as plain XML.
#[must_use]
pub fn parse_descriptor(
    body: &str,
    base: &str,
    content_type: Option<&str>,
    predicates: &PredicateSet,
) -> Option<Graph> {
    match content_type.map_or(Flavor::Other, Flavor::classify) {
        Flavor::Markup => markup::parse(body, base, predicates),
        Flavor::Rdf => rdf::parse(body, base, content_type.unwrap_or_default()),
        Flavor::Xrd | Flavor::Other => xrd::parse(body, base, predicates),
    }
}
