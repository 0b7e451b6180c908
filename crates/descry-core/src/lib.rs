//! # descry-core
//!
//! Core functionality for descry - link-based resource descriptor
//! discovery.
//!
//! Given a resource URI, descry finds the documents that *describe* it by
//! walking an ordered fallback chain: HTTP `Link` headers (and `303 See
//! Other` redirects), links embedded in the resource's own body, and the
//! authority's `/.well-known/host-meta` document with URI-Template
//! expansion. Discovered descriptors can then be fetched and parsed into
//! an in-memory triple graph, memoized per descriptor URI.
//!
//! ## Architecture
//!
//! - **Configuration**: an immutable predicate set and media-type
//!   preference list, fixed at construction
//! - **Fetcher**: a zero-redirect metadata client and a bounded-redirect
//!   content client
//! - **Link extraction**: RFC 8288 `Link` headers and the synthesized
//!   `seeAlso` arc for 303 responses
//! - **Format readers**: RDFa-flavored markup, generic RDF (N-Triples,
//!   Turtle subset, RDF/XML, RDF/JSON) and XRD, each a black box that
//!   either yields a graph or declares itself not applicable
//! - **Orchestrator**: the fallback chain with early exit, the descriptor
//!   cache, and the `process`/`process_all` aggregation
//!
//! ## Quick Start
//!
//! ```no_run
//! use descry_core::Discoverer;
//!
//! # async fn example() -> descry_core::Result<()> {
//! let discoverer = Discoverer::new()?;
//!
//! // Single descriptor, first mechanism that answers wins
//! if let Some(descriptor) = discoverer.discover("https://example.org/res").await {
//!     println!("descriptor: {descriptor}");
//! }
//!
//! // Everything, merged into one graph
//! let graph = discoverer.process_all("https://example.org/res").await;
//! for triple in graph.iter() {
//!     println!("{triple}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! One-shot variants ([`discover`], [`parse`], [`process`],
//! [`process_all`]) build a default-configured instance per call for
//! callers that do not want to manage one.

/// Discoverer configuration: predicates and media-type preferences
pub mod config;
/// The discovery orchestrator, descriptor cache, and aggregation
pub mod discovery;
/// Error types and result aliases
pub mod error;
/// HTTP transport with per-step redirect policies
pub mod fetcher;
/// Content classification and delegated document parsers
pub mod formats;
/// In-memory triple graph with pattern-match queries
pub mod graph;
/// Well-known host-meta resolution and URI-Template expansion
pub mod hostmeta;
/// Link-relation extraction from response metadata
pub mod link;
/// Relation and datatype IRI constants
pub mod vocab;

// Re-export commonly used types
pub use config::{DiscoveryConfig, Predicate, PredicateSet};
pub use discovery::{Discoverer, discover, discover_all, parse, process, process_all};
pub use error::{Error, Result};
pub use fetcher::{FetchedResponse, Fetcher};
pub use graph::{Graph, Term, Triple};
