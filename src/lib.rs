//! # genedex
//!
//! A library and command line tool for indexing genomic annotation features
//! (genes, transcripts, exons) and answering two kinds of questions about
//! them:
//!
//! - **Region queries**: which features overlap `[start, end)` on a
//!   chromosome, for a given annotation source? These are served by a
//!   fixed-width spatial binning index built once at import time.
//! - **Name queries**: which features match a name or identifier substring?
//!   Every hit is expanded to its full gene group, so matching a single exon
//!   id returns the whole gene with all of its transcripts and exons.
//!
//! Both query paths produce a flat, id-ordered list of interval records that
//! [`query::tree::assemble_genes`] reassembles into the nested
//! gene → transcript → exon hierarchy.
//!
//! ## Example
//!
//! ```rust,no_run
//! use genedex::{AnnotationCatalog, RegionQuery, assemble_genes};
//!
//! let catalog = AnnotationCatalog::load(std::path::Path::new("catalog.json")).unwrap();
//! let source = catalog.resolve_source("human", "grch38", "gencode").unwrap();
//!
//! let query = RegionQuery::new(&catalog);
//! let records = query.find(source.id, "chr3", 187_721_377, 187_736_497, 16_384).unwrap();
//! let genes = assemble_genes(records).unwrap();
//!
//! for gene in genes {
//!     println!("{} ({} transcripts)", gene.gene_id, gene.transcripts.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: record store, source metadata, and the bin index
//! - [`core`]: core data types for records, strands, and feature trees
//! - [`query`]: region and name query engines, tree reconstruction
//! - [`parsing`]: GTF parsing and record import
//! - [`cli`]: command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod query;

/// A genomic coordinate. All ranges are 0-based, half-open `[start, end)`.
pub type Position = u64;

// Re-export commonly used types for convenience
pub use crate::catalog::bins::BinIndex;
pub use crate::catalog::store::{AnnotationCatalog, TrackSource};
pub use crate::core::feature::{ExonNode, GeneNode, TranscriptNode};
pub use crate::core::record::IntervalRecord;
pub use crate::core::types::*;
pub use crate::query::name::NameQuery;
pub use crate::query::region::RegionQuery;
pub use crate::query::tree::assemble_genes;
