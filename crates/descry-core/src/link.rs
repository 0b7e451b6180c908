//! Link-relation extraction from HTTP response metadata.
//!
//! Turns RFC 8288 `Link` header values into graph triples whose subject is
//! the requested resource, and provides the one manual synthesis used by
//! the chain: the `rdfs:seeAlso` statement for a `303 See Other` redirect.
//! Pure functions of response metadata; no network or parse side effects.

use crate::config::PredicateSet;
use crate::fetcher::FetchedResponse;
use crate::graph::{Term, Triple};
use crate::vocab;
use url::Url;

/// Extracts link-relation triples for `resource` from a response.
///
/// Every `Link` header value is parsed; each relation token of each link
/// becomes one triple. Tokens naming a configured predicate take that
/// predicate's expanded IRI; other short tokens expand into the IANA
/// relation namespace, and absolute-IRI rels pass through. Targets are
/// resolved against the response's final URL.
#[must_use]
pub fn extract(resource: &str, response: &FetchedResponse, predicates: &PredicateSet) -> Vec<Triple> {
    let mut triples = Vec::new();
    for value in &response.link_headers {
        for link in parse_header_value(value) {
            let target = resolve(&response.url, &link.target);
            for rel in &link.rels {
                let predicate = expand_rel(rel, predicates);
                triples.push(Triple::new(
                    Term::iri(resource),
                    predicate,
                    Term::iri(target.clone()),
                ));
            }
        }
    }
    triples
}

/// Synthesizes the `rdfs:seeAlso` triple for a redirect target.
#[must_use]
pub fn see_also(resource: &str, target: &str) -> Triple {
    Triple::new(
        Term::iri(resource),
        vocab::rdfs::SEE_ALSO,
        Term::iri(resolve(resource, target)),
    )
}

/// One parsed link-value: a target plus its relation tokens.
#[derive(Debug, PartialEq, Eq)]
struct ParsedLink {
    target: String,
    rels: Vec<String>,
}

/// Parses one `Link` header value (possibly comma-separated) into links.
///
/// Handles quoted parameter values, so commas and semicolons inside
/// `rel="..."` or `title="..."` do not split links. Links without a rel
/// parameter are dropped.
fn parse_header_value(value: &str) -> Vec<ParsedLink> {
    split_quoted(value, ',')
        .into_iter()
        .filter_map(|part| parse_link_value(part.trim()))
        .collect()
}

/// Parses a single `<target>; param=value; ...` link-value.
fn parse_link_value(link: &str) -> Option<ParsedLink> {
    let rest = link.strip_prefix('<')?;
    let end = rest.find('>')?;
    let target = rest[..end].trim().to_string();
    if target.is_empty() {
        return None;
    }

    let mut rels = Vec::new();
    for param in split_quoted(&rest[end + 1..], ';') {
        let param = param.trim();
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("rel") {
            continue;
        }
        let unquoted = raw.trim().trim_matches('"');
        // rel is a space-separated list of relation types
        rels.extend(
            unquoted
                .split_ascii_whitespace()
                .map(std::string::ToString::to_string),
        );
        // first rel parameter wins per RFC 8288 §3.3
        break;
    }

    if rels.is_empty() {
        None
    } else {
        Some(ParsedLink { target, rels })
    }
}

/// Splits on a separator, ignoring separators inside double quotes.
fn split_quoted(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth_quoted = false;
    let mut start = 0;
    for (idx, ch) in input.char_indices() {
        match ch {
            '"' => depth_quoted = !depth_quoted,
            c if c == separator && !depth_quoted => {
                parts.push(&input[start..idx]);
                start = idx + ch.len_utf8();
            },
            _ => {},
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Expands a rel token to a predicate IRI.
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

/// Resolves a possibly-relative target against a base URL.
///
/// Falls back to the raw target when the base does not parse, matching
/// the permissive handling of upstream link resolution.
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
