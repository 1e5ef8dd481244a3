//! Region queries backed by the bin index.

use tracing::debug;

use crate::catalog::store::AnnotationCatalog;
use crate::core::record::IntervalRecord;
use crate::core::types::SourceId;
use crate::query::QueryError;
use crate::Position;

/// Finds the records registered in bins intersecting a genomic window.
pub struct RegionQuery<'a> {
    catalog: &'a AnnotationCatalog,
}

impl<'a> RegionQuery<'a> {
    pub fn new(catalog: &'a AnnotationCatalog) -> Self {
        Self { catalog }
    }

    /// Find the records for `source` in bins overlapping `[start, end)` on
    /// `chrom`, deduplicated and sorted ascending by record id.
    ///
    /// The id ordering is load-bearing: import assigns ids so that genes
    /// precede their transcripts and transcripts their exons, which is what
    /// [`crate::query::tree::assemble_genes`] relies on.
    ///
    /// Results are bin-granular: a record overlapping a queried bin is
    /// returned even when it misses `[start, end)` itself. Callers needing
    /// exact overlap post-filter with [`IntervalRecord::overlaps`].
    ///
    /// # Errors
    ///
    /// Fails with [`QueryError::UnknownChromosome`] if `chrom` is not in
    /// the catalog, and [`QueryError::NoIndexForWidth`] if no bin index was
    /// built for `(source, width)`; queries are only served at pre-built
    /// widths.
    pub fn find(
        &self,
        source: SourceId,
        chrom: &str,
        start: Position,
        end: Position,
        width: Position,
    ) -> Result<Vec<&'a IntervalRecord>, QueryError> {
        if !self.catalog.has_chromosome(chrom) {
            return Err(QueryError::UnknownChromosome(chrom.to_string()));
        }

        let index = self
            .catalog
            .bin_index(source, width)
            .ok_or(QueryError::NoIndexForWidth(width))?;

        let ids = index.query(chrom, start, end);
        debug!(
            "region query {chrom}:{start}-{end} touched {} candidate records",
            ids.len()
        );

        let mut records: Vec<&IntervalRecord> = ids
            .into_iter()
            .filter_map(|id| self.catalog.get(id))
            .collect();
        records.sort_by_key(|r| r.id);

        Ok(records)
    }
}
