//! `descry discover` - print descriptor URIs for a resource.

use super::build_discoverer;
use crate::cli::DiscoverArgs;
use crate::output;
use anyhow::Result;

pub async fn run(args: &DiscoverArgs, json: bool) -> Result<i32> {
    let discoverer = build_discoverer(&args.resource)?;

    let found = if args.all {
        discoverer.discover_all(&args.resource.uri).await
    } else {
        discoverer
            .discover(&args.resource.uri)
            .await
            .into_iter()
            .collect()
    };

    output::print_uris(&found, json);
    Ok(i32::from(found.is_empty()))
}
