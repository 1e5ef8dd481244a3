//! Fixed-width spatial binning index over interval records.
//!
//! Each chromosome is partitioned into non-overlapping bins of a fixed
//! width. A record is registered in every bin its interval overlaps, so a
//! range query only has to union the member sets of the bins intersecting
//! the query window instead of scanning all records.
//!
//! The index is built once per (source, width) at import time and is
//! read-only afterwards; rebuilding is a full replace, never an incremental
//! mutation.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::core::record::IntervalRecord;
use crate::core::types::RecordId;
use crate::Position;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("bin width must be positive")]
    InvalidWidth,

    #[error("record {id} has an invalid range: end ({end}) < start ({start})")]
    InvalidRange {
        id: RecordId,
        start: Position,
        end: Position,
    },
}

/// Maps fixed-width genomic bins to the ids of the records overlapping them.
#[derive(Debug, Clone)]
pub struct BinIndex {
    width: Position,

    /// (chromosome, bin start) -> ids of records overlapping the bin
    bins: HashMap<(String, Position), Vec<RecordId>>,
}

impl BinIndex {
    /// Build the index over `records` with the given bin width.
    ///
    /// Every record is registered in each bin between
    /// `floor(start / width) * width` and `floor((end - 1) / width) * width`
    /// inclusive; a zero-length record lands in the single bin containing
    /// its start.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidWidth`] for a zero width, and
    /// [`IndexError::InvalidRange`] for any record with `end < start`.
    /// Both are import-time data faults and fail the whole build.
    pub fn build<'a, I>(records: I, width: Position) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = &'a IntervalRecord>,
    {
        if width == 0 {
            return Err(IndexError::InvalidWidth);
        }

        let mut bins: HashMap<(String, Position), Vec<RecordId>> = HashMap::new();

        for record in records {
            if record.end < record.start {
                return Err(IndexError::InvalidRange {
                    id: record.id,
                    start: record.start,
                    end: record.end,
                });
            }

            // A zero-length record still occupies the bin containing its start.
            let last = if record.end > record.start {
                record.end - 1
            } else {
                record.start
            };

            let mut bin_start = (record.start / width) * width;
            let last_bin = (last / width) * width;
            while bin_start <= last_bin {
                bins.entry((record.chrom.clone(), bin_start))
                    .or_default()
                    .push(record.id);
                bin_start += width;
            }
        }

        Ok(Self { width, bins })
    }

    #[must_use]
    pub fn width(&self) -> Position {
        self.width
    }

    /// Number of non-empty bins across all chromosomes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Collect the ids of all records registered in bins whose start lies in
    /// `[floor(start / width) * width, end)` on `chrom`.
    ///
    /// Absent bins contribute nothing; a query touching no bins returns an
    /// empty set, which is a normal outcome and not an error. The result is
    /// deduplicated but bin-granular: records touching a queried bin outside
    /// the exact window are included. Callers needing exact overlap
    /// post-filter with [`IntervalRecord::overlaps`].
    #[must_use]
    pub fn query(&self, chrom: &str, start: Position, end: Position) -> HashSet<RecordId> {
        let mut ids = HashSet::new();

        let mut bin_start = (start / self.width) * self.width;
        while bin_start < end {
            if let Some(members) = self.bins.get(&(chrom.to_string(), bin_start)) {
                ids.extend(members.iter().copied());
            }
            bin_start += self.width;
        }

        ids
    }
}
