//! Command-line interface for genedex.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **build**: Import a GTF annotation and write a query-ready catalog
//! - **query**: Find the genes overlapping a genomic region
//! - **search**: Find genes by name or identifier substring
//!
//! ## Usage
//!
//! ```text
//! # Build a catalog from a GENCODE GTF
//! genedex build gencode.v38.annotation.gtf.gz -o catalog.json
//!
//! # What overlaps this window?
//! genedex query --chr chr3 -s 187721377 -e 187736497
//!
//! # JSON output for scripting
//! genedex search BCL6 --format json
//! ```

use clap::{Parser, Subcommand};

use crate::core::feature::GeneNode;

pub mod build;
pub mod query;
pub mod search;

#[derive(Parser)]
#[command(name = "genedex")]
#[command(version)]
#[command(about = "Index and query genomic annotation features")]
#[command(
    long_about = "genedex indexes genomic annotation features (genes, transcripts, exons)\nand answers region and name queries against them.\n\nA catalog is built offline from a GTF annotation; queries run against the\npre-built catalog and return the matching genes with their transcripts and\nexons reassembled into a tree."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a GTF annotation into a query-ready catalog
    Build(build::BuildArgs),

    /// Find the genes overlapping a genomic region
    Query(query::QueryArgs),

    /// Find genes by name or identifier substring
    Search(search::SearchArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render a reconstructed gene list in the requested format.
pub(crate) fn print_genes(genes: &[GeneNode], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(genes)?);
        }
        OutputFormat::Text => {
            if genes.is_empty() {
                println!("no matches");
            }
            for gene in genes {
                let name = gene.name.as_deref().unwrap_or("-");
                println!("{}\t{}\t{}\t{}", gene.gene_id, name, gene.location, gene.strand);
                for transcript in &gene.transcripts {
                    let name = transcript.name.as_deref().unwrap_or("-");
                    println!(
                        "  {}\t{}\t{}\t{} exons",
                        transcript.transcript_id,
                        name,
                        transcript.location,
                        transcript.exons.len()
                    );
                }
            }
        }
    }
    Ok(())
}
