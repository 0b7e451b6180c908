//! The discovery orchestrator: ordered fallback chain, descriptor cache,
//! and the aggregation entry points.
//!
//! Discovery runs a strict sequence over one working graph:
//!
//! 1. **Header step** - HEAD the resource without following redirects;
//!    collect `Link` header triples, and synthesize an `rdfs:seeAlso` arc
//!    when the response is a `303 See Other`.
//! 2. **Body step** - when the response advertises an RDFa-bearing markup
//!    type or a native RDF type, GET the resource (at most 3 redirects)
//!    and merge the parsed triples into the working graph.
//! 3. **Host-meta step** - resolve the authority's well-known host-meta
//!    document and query it directly and through URI-Template expansion.
//! 4. **Self-description fallback** - when the body itself parsed, the
//!    resource can stand as its own descriptor.
//!
//! Single-result discovery short-circuits as soon as a step yields a
//! candidate; multi-result discovery runs every step and accumulates, in
//! order, never retracting earlier findings. Network and parse failures
//! inside the chain degrade the affected step to "no candidates".
//!
//! ## Quick Start
//!
//! ```no_run
//! use descry_core::Discoverer;
//!
//! # async fn example() -> descry_core::Result<()> {
//! let discoverer = Discoverer::new()?;
//!
//! if let Some(descriptor) = discoverer.discover("https://example.org/thing").await {
//!     println!("described by: {descriptor}");
//!     if let Some(graph) = discoverer.parse(&descriptor).await {
//!         println!("descriptor holds {} statements", graph.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::{DiscoveryConfig, PredicateSet};
use crate::fetcher::Fetcher;
use crate::formats::{self, Flavor, markup, rdf};
use crate::graph::Graph;
use crate::link;
use crate::{Result, hostmeta, vocab};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use url::Url;

/// Link-based descriptor discoverer.
///
/// Owns the predicate configuration, the HTTP client pair, and the
/// process-lifetime descriptor cache. Cheap to share behind an `Arc`;
/// every discovery call works on its own graph, and cache access is
/// serialized internally.
pub struct Discoverer {
    config: DiscoveryConfig,
    fetcher: Fetcher,
    cache: Mutex<HashMap<String, Arc<Graph>>>,
}

impl Discoverer {
    /// Creates a discoverer with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(DiscoveryConfig::default())
    }

    /// Creates a discoverer from an explicit configuration.
    pub fn with_config(config: DiscoveryConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self {
            config,
            fetcher,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Creates a discoverer with a custom predicate set.
    pub fn with_predicates(predicates: PredicateSet) -> Result<Self> {
        Self::with_config(DiscoveryConfig::with_predicates(predicates))
    }

    /// Creates a discoverer with the strict two-relation preset.
    pub fn strict() -> Result<Self> {
        Self::with_predicates(PredicateSet::strict())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Discovers the first descriptor URI for a resource, if any.
    #[instrument(skip_all, fields(resource = %resource))]
    pub async fn discover(&self, resource: &str) -> Option<String> {
        self.run_chain(resource, false).await.into_iter().next()
    }

    /// Discovers every descriptor URI the chain can find, in step order.
    ///
    /// The sequence is duplicate-tolerant: the same URI announced through
    /// several mechanisms appears once per announcement.
    #[instrument(skip_all, fields(resource = %resource))]
    pub async fn discover_all(&self, resource: &str) -> Vec<String> {
        self.run_chain(resource, true).await
    }

    /// Fetches and parses a descriptor document, memoized per URI.
    ///
    /// The first successful parse of a URI is cached for the lifetime of
    /// this discoverer; later calls return the cached graph without
    /// network I/O. Failures cache nothing, so a URI that was unreachable
    /// once is retried on the next call.
    #[instrument(skip_all, fields(descriptor = %descriptor))]
    pub async fn parse(&self, descriptor: &str) -> Option<Arc<Graph>> {
        // the lock spans check-fetch-store so concurrent callers cannot
        // race duplicate fetches for the same key
        let mut cache = self.cache.lock().await;
        if let Some(graph) = cache.get(descriptor) {
            debug!("descriptor cache hit");
            return Some(Arc::clone(graph));
        }

        let response = match self.fetcher.get(descriptor).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                debug!(status = response.status, "descriptor fetch was not successful");
                return None;
            },
            Err(e) => {
                debug!(error = %e, "descriptor fetch failed");
                return None;
            },
        };

        let graph = formats::parse_descriptor(
            &response.body,
            &response.url,
            response.content_type.as_deref(),
            &self.config.predicates,
        )?;
        info!(triples = graph.len(), "descriptor parsed");

        let graph = Arc::new(graph);
        cache.insert(descriptor.to_string(), Arc::clone(&graph));
        Some(graph)
    }

    /// Single-mode discovery composed with descriptor retrieval.
    pub async fn process(&self, resource: &str) -> Option<Arc<Graph>> {
        let descriptor = self.discover(resource).await?;
        self.parse(&descriptor).await
    }

    /// Multi-mode discovery composed with retrieval of everything.
    ///
    /// Parses the resource itself and every discovered descriptor, and
    /// merges all resulting graphs into one. Duplicated statements are
    /// preserved; an empty graph means nothing was found or parseable.
    pub async fn process_all(&self, resource: &str) -> Graph {
        let descriptors = self.discover_all(resource).await;
        let mut merged = Graph::new();

        if let Some(own) = self.parse(resource).await {
            merged.merge(&own);
        }
        for descriptor in descriptors {
            // the self-description candidate is already merged above
            if descriptor == resource {
                continue;
            }
            if let Some(graph) = self.parse(&descriptor).await {
                merged.merge(&graph);
            }
        }
        merged
    }

    /// Runs the fallback chain; `want_all` disables short-circuiting.
    #[instrument(skip_all, fields(resource = %resource, want_all))]
    async fn run_chain(&self, resource: &str, want_all: bool) -> Vec<String> {
        let mut working = Graph::new();
        let mut subjects = subject_aliases(resource);
        let mut body_graph: Option<Graph> = None;

        let is_http =
            Url::parse(resource).is_ok_and(|u| matches!(u.scheme(), "http" | "https"));

        // step 1: response metadata
        let head = if is_http {
            match self.fetcher.head(resource).await {
                Ok(response) => {
                    for triple in link::extract(resource, &response, &self.config.predicates) {
                        working.add(triple);
                    }
                    if response.is_see_other() {
                        if let Some(location) = &response.location {
                            debug!(location = %location, "303 redirect, synthesizing seeAlso");
                            working.add(link::see_also(resource, location));
                        }
                    }
                    Some(response)
                },
                Err(e) => {
                    debug!(error = %e, "header step failed, continuing");
                    None
                },
            }
        } else {
            None
        };

        if !want_all {
            if let Some(hit) = self.query_first(&working, Some(&subjects)) {
                info!(descriptor = %hit, "found via response metadata");
                return vec![hit];
            }
        }

        // step 2: response body
        if let Some(head) = &head {
            if let Some(parsed) = self.body_step(resource, head).await {
                add_alias(&mut subjects, &parsed.1);
                working.merge(&parsed.0);
                body_graph = Some(parsed.0);
            }
        }

        if !want_all {
            if let Some(hit) = self.query_first(&working, Some(&subjects)) {
                info!(descriptor = %hit, "found via response body");
                return vec![hit];
            }
        }

        let mut results = if want_all {
            self.query_all(&working, Some(&subjects))
        } else {
            Vec::new()
        };

        // step 3: host-meta
        if let Some(authority) = hostmeta::authority(resource) {
            if let Some(host_meta) =
                hostmeta::resolve(&self.fetcher, &authority, &self.config.predicates).await
            {
                // host-meta assertions are host-scoped: subject unconstrained
                let direct = self.query_all(&host_meta, None);
                let templates = self.expand_templates(&host_meta, resource);
                if want_all {
                    results.extend(direct);
                    results.extend(templates);
                } else if let Some(hit) = direct.into_iter().next().or_else(|| {
                    templates.into_iter().next()
                }) {
                    info!(descriptor = %hit, "found via host-meta");
                    return vec![hit];
                }
            }
        }

        // step 4: a machine-readable resource may describe itself
        if let Some(body_graph) = &body_graph {
            let self_describing = subjects.iter().any(|s| body_graph.has_subject(s));
            if results.is_empty() || self_describing {
                info!("falling back to the resource as its own descriptor");
                results.push(resource.to_string());
            }
        }

        if results.is_empty() {
            info!("no descriptor found");
        }
        results
    }

    /// Body step: one content-negotiated GET, one parse, at most.
    ///
    /// Returns the parsed graph and the final URL it was parsed against.
    async fn body_step(
        &self,
        resource: &str,
        head: &crate::fetcher::FetchedResponse,
    ) -> Option<(Graph, String)> {
        let content_type = head.content_type.as_deref()?;
        let flavor = Flavor::classify(content_type);
        if !matches!(flavor, Flavor::Markup | Flavor::Rdf) {
            return None;
        }

        let response = match self.fetcher.get(resource).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                debug!(status = response.status, "body fetch was not successful");
                return None;
            },
            Err(e) => {
                debug!(error = %e, "body step failed, continuing");
                return None;
            },
        };

        // the follow-up GET may be served with a different content type
        let content_type = response.content_type.as_deref().unwrap_or(content_type);
        let graph = match Flavor::classify(content_type) {
            Flavor::Markup => markup::parse(&response.body, &response.url, &self.config.predicates),
            Flavor::Rdf => rdf::parse(&response.body, &response.url, content_type),
            Flavor::Xrd | Flavor::Other => match flavor {
                Flavor::Markup => {
                    markup::parse(&response.body, &response.url, &self.config.predicates)
                },
                _ => rdf::parse(&response.body, &response.url, content_type),
            },
        }?;

        debug!(triples = graph.len(), "body parsed");
        Some((graph, response.url))
    }

    /// First candidate in predicate-priority order, or `None`.
    ///
    /// Predicates are tried in declared order and the first one with any
    /// match wins; within a predicate, graph insertion order decides.
    /// This is the deterministic tie-break for multi-predicate graphs.
    fn query_first(&self, graph: &Graph, subjects: Option<&[String]>) -> Option<String> {
        self.query_all(graph, subjects).into_iter().next()
    }

    /// Every candidate, predicate-major, insertion order within.
    fn query_all(&self, graph: &Graph, subjects: Option<&[String]>) -> Vec<String> {
        let mut results = Vec::new();
        for predicate in self.config.predicates.iter() {
            for triple in graph.matching(None, Some(predicate.uri())) {
                if let Some(allowed) = subjects {
                    let matches = triple
                        .subject
                        .as_iri()
                        .is_some_and(|s| allowed.iter().any(|a| a == s));
                    if !matches {
                        continue;
                    }
                }
                if let Some(iri) = triple.object.as_iri() {
                    // blank nodes cannot name a retrievable descriptor
                    if !iri.starts_with("_:") {
                        results.push(iri.to_string());
                    }
                }
            }
        }
        results
    }

    /// Expands every URI-Template announced for a configured predicate.
    fn expand_templates(&self, host_meta: &Graph, resource: &str) -> Vec<String> {
        let mut results = Vec::new();
        for predicate in self.config.predicates.iter() {
            for triple in host_meta.matching(None, Some(predicate.uri())) {
                if triple.object.has_datatype(vocab::xrd::URI_TEMPLATE) {
                    results.push(hostmeta::expand_template(triple.object.lexical(), resource));
                }
            }
        }
        results
    }
}

/// The resource URI plus its URL-normalized spelling.
///
/// Body subjects are compared against these: a parser working from the
/// final response URL may see `http://host/` where the caller passed
/// `http://host`, and both name the same resource.
fn subject_aliases(resource: &str) -> Vec<String> {
    let mut aliases = vec![resource.to_string()];
    if let Ok(url) = Url::parse(resource) {
        add_alias(&mut aliases, url.as_ref());
    }
    aliases
}

fn add_alias(aliases: &mut Vec<String>, candidate: &str) {
    if !aliases.iter().any(|a| a == candidate) {
        aliases.push(candidate.to_string());
    }
}

/// One-shot single-mode discovery with a default-configured discoverer.
pub async fn discover(resource: &str) -> Result<Option<String>> {
    Ok(Discoverer::new()?.discover(resource).await)
}

/// One-shot multi-mode discovery with a default-configured discoverer.
pub async fn discover_all(resource: &str) -> Result<Vec<String>> {
    Ok(Discoverer::new()?.discover_all(resource).await)
}

/// One-shot descriptor retrieval with a default-configured discoverer.
pub async fn parse(descriptor: &str) -> Result<Option<Arc<Graph>>> {
    Ok(Discoverer::new()?.parse(descriptor).await)
}

/// One-shot discover-and-parse with a default-configured discoverer.
pub async fn process(resource: &str) -> Result<Option<Arc<Graph>>> {
    Ok(Discoverer::new()?.process(resource).await)
}

/// One-shot full aggregation with a default-configured discoverer.
pub async fn process_all(resource: &str) -> Result<Graph> {
    Ok(Discoverer::new()?.process_all(resource).await)
}
