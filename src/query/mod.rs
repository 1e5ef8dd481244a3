//! Query engines over the annotation catalog.
//!
//! Region and name queries both produce flat, ordered record lists;
//! [`tree::assemble_genes`] turns either into the nested
//! gene → transcript → exon hierarchy. All engines are pure reads over the
//! immutable catalog and run concurrently without locking.

pub mod name;
pub mod region;
pub mod tree;

use thiserror::Error;

use crate::Position;

/// Query-time failures.
///
/// "No matches" is never an error: engines return an empty result set when
/// nothing overlaps. These variants mean the query named something the
/// catalog does not have.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("no bin index built at width {0}")]
    NoIndexForWidth(Position),
}
