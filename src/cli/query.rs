use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::catalog::store::{AnnotationCatalog, DEFAULT_BIN_WIDTH};
use crate::cli::{print_genes, OutputFormat};
use crate::query::region::RegionQuery;
use crate::query::tree::assemble_genes;
use crate::Position;

#[derive(Args)]
pub struct QueryArgs {
    /// Catalog file to query
    #[arg(short, long, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Genome of the annotation source
    #[arg(long, default_value = "Human")]
    pub genome: String,

    /// Assembly of the annotation source
    #[arg(long, default_value = "grch38")]
    pub assembly: String,

    /// Annotation track of the source
    #[arg(long, default_value = "gencode")]
    pub track: String,

    /// Chromosome to query
    #[arg(long = "chr")]
    pub chrom: String,

    /// Window start (0-based, inclusive)
    #[arg(short, long)]
    pub start: Position,

    /// Window end (exclusive)
    #[arg(short, long)]
    pub end: Position,

    /// Bin width to query at; must have been built into the catalog
    #[arg(short, long, default_value_t = DEFAULT_BIN_WIDTH)]
    pub width: Position,
}

/// Execute query subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the source or
/// chromosome is unknown, or no bin index exists at the requested width.
pub fn run(args: QueryArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = AnnotationCatalog::load(&args.catalog)
        .with_context(|| format!("failed to load {}", args.catalog.display()))?;

    let source = catalog
        .resolve_source(&args.genome, &args.assembly, &args.track)
        .with_context(|| {
            format!(
                "unknown source {}/{}/{}",
                args.genome, args.assembly, args.track
            )
        })?;

    let records = RegionQuery::new(&catalog).find(
        source.id,
        &args.chrom,
        args.start,
        args.end,
        args.width,
    )?;
    if verbose {
        eprintln!(
            "{} records in bins overlapping {}:{}-{}",
            records.len(),
            args.chrom,
            args.start,
            args.end
        );
    }

    let genes = assemble_genes(records)?;
    print_genes(&genes, format)
}
