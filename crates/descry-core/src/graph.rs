//! In-memory triple graph with pattern-match queries.
//!
//! The working model for one discovery or parse invocation: a bag of
//! triples (`Vec` storage, duplicates preserved) over two term kinds, IRIs
//! and literals. Queries are direct pattern matches with any position
//! wildcardable; there is no query language and no inference.
//!
//! ## Examples
//!
//! ```rust
//! use descry_core::graph::{Graph, Term, Triple};
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/doc"),
//!     "http://www.w3.org/2000/01/rdf-schema#seeAlso",
//!     Term::iri("http://example.org/doc.meta"),
//! );
//!
//! let hits: Vec<&Triple> = graph
//!     .matching(Some("http://example.org/doc"), None)
//!     .collect();
//! assert_eq!(hits.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// A node in the graph: an IRI or a literal value.
///
/// Blank nodes from parsed documents are carried as IRI terms under their
/// `_:` label; the discovery chain never emits them as results because it
/// only accepts absolute IRI objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// An IRI reference.
    Iri(String),
    /// A literal with an optional datatype IRI.
    Literal {
        /// Lexical value.
        value: String,
        /// Datatype IRI, when typed.
        datatype: Option<String>,
    },
}

impl Term {
    /// Creates an IRI term.
    #[must_use]
    pub fn iri(value: impl Into<String>) -> Self {
        Self::Iri(value.into())
    }

    /// Creates an untyped literal term.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: None,
        }
    }

    /// Creates a literal term with a datatype IRI.
    #[must_use]
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
        }
    }

    /// The IRI value, when this term is an IRI.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(v) => Some(v),
            Self::Literal { .. } => None,
        }
    }

    /// The lexical value, for both IRIs and literals.
    #[must_use]
    pub fn lexical(&self) -> &str {
        match self {
            Self::Iri(v) => v,
            Self::Literal { value, .. } => value,
        }
    }

    /// Whether this is a literal carrying the given datatype IRI.
    #[must_use]
    pub fn has_datatype(&self, iri: &str) -> bool {
        matches!(self, Self::Literal { datatype: Some(d), .. } if d == iri)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iri(v) => write!(f, "<{v}>"),
            Self::Literal {
                value,
                datatype: Some(d),
            } => write!(f, "{value:?}^^<{d}>"),
            Self::Literal {
                value,
                datatype: None,
            } => write!(f, "{value:?}"),
        }
    }
}

/// A subject / predicate / object statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term (IRI in everything the chain produces).
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

impl Triple {
    /// Creates a triple from its components.
    #[must_use]
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// A bag of triples with direct pattern matching.
///
/// Duplicates are preserved: merging descriptor graphs must not lose or
/// reconcile repeated statements, so set semantics are left to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple.
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Adds a triple by components.
    pub fn add_triple(&mut self, subject: Term, predicate: impl Into<String>, object: Term) {
        self.add(Triple::new(subject, predicate, object));
    }

    /// Number of triples, duplicates counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples matching the given subject and predicate patterns.
    ///
    /// `None` in a position matches anything. Results come back in
    /// insertion order.
    pub fn matching<'a>(
        &'a self,
        subject: Option<&'a str>,
        predicate: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Triple> {
        self.triples.iter().filter(move |t| {
            subject.is_none_or(|s| t.subject.as_iri() == Some(s))
                && predicate.is_none_or(|p| t.predicate == p)
        })
    }

    /// Objects of triples matching the given subject and predicate.
    pub fn objects<'a>(
        &'a self,
        subject: Option<&'a str>,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> {
        self.matching(subject, Some(predicate)).map(|t| &t.object)
    }

    /// Whether any triple has the given IRI as subject.
    #[must_use]
    pub fn has_subject(&self, iri: &str) -> bool {
        self.triples
            .iter()
            .any(|t| t.subject.as_iri() == Some(iri))
    }

    /// Appends every triple of `other`, duplicates included.
    pub fn merge(&mut self, other: &Graph) {
        self.triples.extend(other.triples.iter().cloned());
    }

    /// Whether this graph contains the given triple at least as often as
    /// `other` does, for every triple of `other`.
    #[must_use]
    pub fn is_superset_of(&self, other: &Graph) -> bool {
        other.triples.iter().all(|needle| {
            let have = self.triples.iter().filter(|t| *t == needle).count();
            let want = other.triples.iter().filter(|t| *t == needle).count();
            have >= want
        })
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}
