//! Discoverer configuration: relation predicates and media-type preferences.
//!
//! All configuration is immutable once a [`crate::Discoverer`] is built.
//! Process-wide defaults live here as constants and `Default` impls rather
//! than global mutable state; a caller that wants different predicates
//! passes an explicit [`PredicateSet`] at construction time.
//!
//! ## Examples
//!
//! ```rust
//! use descry_core::config::{DiscoveryConfig, Predicate, PredicateSet};
//!
//! // The default four-relation set, in priority order
//! let config = DiscoveryConfig::default();
//! assert_eq!(config.predicates.len(), 4);
//!
//! // A custom set: short tokens expand into the IANA relation namespace
//! let set = PredicateSet::new(vec![Predicate::new("lrdd")]);
//! assert_eq!(
//!     set.iter().next().unwrap().uri(),
//!     "http://www.iana.org/assignments/relation/lrdd"
//! );
//! ```

use crate::vocab;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Accept header advertised on every request, most specific first.
///
/// Descriptor formats are preferred over the markup formats they may be
/// embedded in, with a trailing wildcard so unannotated servers still
/// answer.
pub const ACCEPT_PREFERENCE: &str = "application/xrd+xml, application/rdf+xml, text/turtle, \
     application/atom+xml;q=0.9, application/xhtml+xml;q=0.9, text/html;q=0.9, */*;q=0.1";

/// Default request timeout applied to every HTTP call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A link-relation predicate used to recognize discovery links.
///
/// A predicate is always carried as an expanded absolute IRI. When it was
/// configured from a short registered token (e.g. `lrdd`), the token is
/// kept as well so markup and `Link` header rels can be matched in either
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    uri: String,
    token: Option<String>,
}

impl Predicate {
    /// Creates a predicate from a relation token or an absolute IRI.
    ///
    /// Tokens without a scheme expand into the IANA link-relation
    /// namespace, keeping the short form for attribute-level matching.
    #[must_use]
    pub fn new(relation: &str) -> Self {
        if relation.contains("://") {
            Self {
                uri: relation.to_string(),
                token: None,
            }
        } else {
            Self {
                uri: format!("{}{relation}", vocab::iana::NS),
                token: Some(relation.to_string()),
            }
        }
    }

    /// Creates a predicate with an explicit IRI and short token.
    #[must_use]
    pub fn with_token(uri: &str, token: &str) -> Self {
        Self {
            uri: uri.to_string(),
            token: Some(token.to_string()),
        }
    }

    /// The expanded absolute IRI of this relation.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The short registered token, when the predicate has one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a rel attribute value names this predicate.
    ///
    /// Matches the full IRI exactly or the short token case-insensitively,
    /// per the registered-relation comparison rules.
    #[must_use]
    pub fn matches_rel(&self, rel: &str) -> bool {
        if rel == self.uri {
            return true;
        }
        self.token
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(rel))
    }
}

/// Ordered, duplicate-free collection of discovery predicates.
///
/// Order is significant: the single-result query returns the first
/// predicate (in declared order) with any match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// Builds a set from the given predicates, dropping duplicates by IRI
    /// while preserving first-seen order.
    #[must_use]
    pub fn new(predicates: Vec<Predicate>) -> Self {
        let mut seen: Vec<Predicate> = Vec::with_capacity(predicates.len());
        for p in predicates {
            if !seen.iter().any(|q| q.uri() == p.uri()) {
                seen.push(p);
            }
        }
        Self { predicates: seen }
    }

    /// Builds a set from relation tokens or IRIs.
    #[must_use]
    pub fn from_relations(relations: &[&str]) -> Self {
        Self::new(relations.iter().map(|r| Predicate::new(r)).collect())
    }

    /// The strict two-relation preset: `describedby` and `lrdd` only.
    #[must_use]
    pub fn strict() -> Self {
        Self::new(vec![
            Predicate::with_token(vocab::powder::DESCRIBEDBY, "describedby"),
            Predicate::with_token(vocab::iana::LRDD, "lrdd"),
        ])
    }

    /// Number of predicates in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Iterates predicates in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    /// Finds the predicate matching a rel attribute value, if any.
    #[must_use]
    pub fn match_rel(&self, rel: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.matches_rel(rel))
    }

    /// Whether an expanded IRI names a predicate in this set.
    #[must_use]
    pub fn contains_uri(&self, uri: &str) -> bool {
        self.predicates.iter().any(|p| p.uri() == uri)
    }
}

impl Default for PredicateSet {
    /// The default four-relation set, in priority order: POWDER
    /// `describedby`, IANA `lrdd`, XHTML `meta`, RDFS `seeAlso`.
    fn default() -> Self {
        Self::new(vec![
            Predicate::with_token(vocab::powder::DESCRIBEDBY, "describedby"),
            Predicate::with_token(vocab::iana::LRDD, "lrdd"),
            Predicate::with_token(vocab::xhtml::META, "meta"),
            Predicate::new(vocab::rdfs::SEE_ALSO),
        ])
    }
}

/// Immutable configuration for a discoverer instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Relations recognized as discovery links, in priority order.
    pub predicates: PredicateSet,

    /// Accept header value sent on every request.
    pub accept: String,

    /// Per-request timeout.
    #[serde(skip, default = "default_timeout")]
    pub timeout: Duration,

    /// User agent sent on every request.
    pub user_agent: String,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            predicates: PredicateSet::default(),
            accept: ACCEPT_PREFERENCE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("descry/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Default configuration with a custom predicate set.
    #[must_use]
    pub fn with_predicates(predicates: PredicateSet) -> Self {
        Self {
            predicates,
            ..Self::default()
        }
    }
}
