use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::catalog::store::{AnnotationCatalog, DEFAULT_BIN_WIDTH};
use crate::cli::OutputFormat;
use crate::parsing::gtf::read_gtf;
use crate::parsing::import::RecordImporter;
use crate::Position;

#[derive(Args)]
pub struct BuildArgs {
    /// Input GTF annotation (.gtf, optionally gzip-compressed)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output catalog file
    #[arg(short, long, default_value = "catalog.json")]
    pub output: PathBuf,

    /// Genome the annotation belongs to
    #[arg(long, default_value = "Human")]
    pub genome: String,

    /// Assembly the annotation coordinates refer to
    #[arg(long, default_value = "grch38")]
    pub assembly: String,

    /// Annotation track
    #[arg(long, default_value = "gencode")]
    pub track: String,

    /// Track version label
    #[arg(long = "track-version", default_value = "")]
    pub track_version: String,

    /// Bin width to index at (may be given multiple times)
    #[arg(short, long = "width", default_values_t = [DEFAULT_BIN_WIDTH])]
    pub widths: Vec<Position>,
}

/// Execute build subcommand
///
/// # Errors
///
/// Returns an error if the GTF cannot be parsed, the annotation violates
/// the gene/transcript/exon structure, or the catalog cannot be written.
pub fn run(args: BuildArgs, _format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let gtf = read_gtf(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    if verbose {
        eprintln!("parsed {} feature lines", gtf.len());
    }

    let mut catalog = AnnotationCatalog::new();
    let source = catalog.add_source(
        &args.genome,
        &args.assembly,
        &args.track,
        &args.track_version,
    );

    let records = RecordImporter::new()
        .import(&gtf, source)
        .context("annotation import failed")?;
    info!("imported {} records", records.len());
    catalog.add_records(records);

    for &width in &args.widths {
        catalog
            .build_bin_index(source, width)
            .with_context(|| format!("bin index build failed at width {width}"))?;
    }

    catalog
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "wrote {} records ({} source, widths {:?}) to {}",
        catalog.len(),
        catalog.sources().len(),
        catalog.bin_widths(),
        args.output.display()
    );
    Ok(())
}
