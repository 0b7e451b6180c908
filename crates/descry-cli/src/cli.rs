//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

/// Discover and retrieve the documents that describe a web resource.
#[derive(Debug, Parser)]
#[command(name = "descry", version, about, propagate_version = true)]
pub struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log every request and parse decision to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find descriptor URIs for a resource
    Discover(DiscoverArgs),
    /// Find the first descriptor and print its parsed statements
    Resolve(ResourceArgs),
    /// Retrieve and merge every available description of a resource
    Describe(ResourceArgs),
}

/// Arguments shared by every discovery-driven command.
#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// The resource URI to describe
    pub uri: String,

    /// Recognize only these link relations (token or IRI, ordered)
    #[arg(short, long = "predicate", value_name = "REL")]
    pub predicates: Vec<String>,

    /// Use the strict two-relation preset (describedby, lrdd)
    #[arg(long, conflicts_with = "predicates")]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Run every discovery mechanism instead of stopping at the first hit
    #[arg(short, long)]
    pub all: bool,
}
