//! `descry resolve` - fetch and print the first descriptor's statements.

use super::build_discoverer;
use crate::cli::ResourceArgs;
use crate::output;
use anyhow::Result;

pub async fn run(args: &ResourceArgs, json: bool) -> Result<i32> {
    let discoverer = build_discoverer(args)?;

    match discoverer.process(&args.uri).await {
        Some(graph) => {
            output::print_graph(&graph, json);
            Ok(0)
        },
        None => {
            eprintln!("no descriptor found for {}", args.uri);
            Ok(1)
        },
    }
}
