//! Command implementations.

pub mod describe;
pub mod discover;
pub mod resolve;

use crate::cli::ResourceArgs;
use anyhow::Result;
use descry_core::{Discoverer, Predicate, PredicateSet};

/// Builds a discoverer from the shared resource arguments.
pub fn build_discoverer(args: &ResourceArgs) -> Result<Discoverer> {
    let discoverer = if args.strict {
        Discoverer::strict()?
    } else if args.predicates.is_empty() {
        Discoverer::new()?
    } else {
        let predicates = args.predicates.iter().map(|r| Predicate::new(r)).collect();
        Discoverer::with_predicates(PredicateSet::new(predicates))?
    };
    Ok(discoverer)
}
