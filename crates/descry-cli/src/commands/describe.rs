//! `descry describe` - merge every available description of a resource.

use super::build_discoverer;
use crate::cli::ResourceArgs;
use crate::output;
use anyhow::Result;

pub async fn run(args: &ResourceArgs, json: bool) -> Result<i32> {
    let discoverer = build_discoverer(args)?;

    let merged = discoverer.process_all(&args.uri).await;
    if merged.is_empty() {
        eprintln!("no description found for {}", args.uri);
        return Ok(1);
    }

    output::print_graph(&merged, json);
    Ok(0)
}
