//! Well-known host-meta resolution and URI-Template expansion.
//!
//! A resource's authority may publish a host-level XRD descriptor at
//! `/.well-known/host-meta`. Resolution tries the HTTPS location first and
//! falls back to HTTP; the first response that is successful *and* parses
//! as XRD wins. Both failing is the normal "no host-meta" outcome, never
//! an error. Loopback authorities get the HTTP candidate only, so local
//! test servers work without TLS fixtures.

use crate::config::PredicateSet;
use crate::fetcher::Fetcher;
use crate::formats::xrd;
use crate::graph::Graph;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;
use url::Url;

/// Path of the host-level descriptor document.
pub const WELL_KNOWN_PATH: &str = "/.well-known/host-meta";

/// Everything except unreserved characters gets percent-encoded when a
/// resource URI is substituted into a template.
const TEMPLATE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Extracts the authority (host, with any non-default port) of a URI.
#[must_use]
pub fn authority(resource: &str) -> Option<String> {
    let url = Url::parse(resource).ok()?;
    let host = url.host_str()?;
    Some(url.port().map_or_else(
        || host.to_string(),
        |port| format!("{host}:{port}"),
    ))
}

/// Candidate host-meta URLs for an authority, in retrieval order.
///
/// HTTPS before HTTP; loopback authorities only get the HTTP candidate.
#[must_use]
pub fn well_known_candidates(authority: &str) -> Vec<String> {
    if is_loopback(authority) {
        return vec![format!("http://{authority}{WELL_KNOWN_PATH}")];
    }
    vec![
        format!("https://{authority}{WELL_KNOWN_PATH}"),
        format!("http://{authority}{WELL_KNOWN_PATH}"),
    ]
}

fn is_loopback(authority: &str) -> bool {
    let host = authority
        .rsplit_once(':')
        .map_or(authority, |(host, _)| host);
    host == "localhost" || host == "127.0.0.1" || host == "[::1]"
}

/// Fetches and parses the host-meta document for an authority.
///
/// Tries each candidate URL in order; the first 2xx response whose body
/// parses as XRD yields the graph. `None` means the host publishes no
/// usable host-meta.
pub async fn resolve(
    fetcher: &Fetcher,
    authority: &str,
    predicates: &PredicateSet,
) -> Option<Graph> {
    for candidate in well_known_candidates(authority) {
        match fetcher.get(&candidate).await {
            Ok(response) if response.is_success() => {
                if let Some(graph) = xrd::parse(&response.body, &response.url, predicates) {
                    debug!(url = %candidate, triples = graph.len(), "host-meta resolved");
                    return Some(graph);
                }
                debug!(url = %candidate, "host-meta response did not parse as XRD");
            },
            Ok(response) => {
                debug!(url = %candidate, status = response.status, "host-meta miss");
            },
            Err(e) => {
                debug!(url = %candidate, error = %e, "host-meta fetch failed");
            },
        }
    }
    None
}

/// Expands a URI-Template by substituting the `{uri}` placeholder.
///
/// Every case-insensitive occurrence of `{uri}` is replaced with the
/// percent-encoded resource URI. Templates without the placeholder come
/// back unchanged.
#[must_use]
pub fn expand_template(template: &str, resource: &str) -> String {
    let encoded = utf8_percent_encode(resource, TEMPLATE_ENCODE_SET).to_string();
    let mut result = String::with_capacity(template.len() + encoded.len());
    let mut rest = template;
    while let Some(idx) = rest.to_ascii_lowercase().find("{uri}") {
        result.push_str(&rest[..idx]);
        result.push_str(&encoded);
        rest = &rest[idx + "{uri}".len()..];
    }
    result.push_str(rest);
    result
}
