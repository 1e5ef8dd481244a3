use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::catalog::store::AnnotationCatalog;
use crate::cli::{print_genes, OutputFormat};
use crate::query::name::NameQuery;
use crate::query::tree::assemble_genes;

#[derive(Args)]
pub struct SearchArgs {
    /// Name or identifier substring to search for (case-insensitive)
    #[arg(required = true)]
    pub pattern: String,

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
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the source is
/// unknown.
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
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

    let records = NameQuery::new(&catalog).find(source.id, &args.pattern);
    if verbose {
        eprintln!("{} records across matched gene groups", records.len());
    }

    let genes = assemble_genes(records)?;
    print_genes(&genes, format)
}
