use serde::{Deserialize, Serialize};

use crate::core::types::{FeatureKind, GroupId, RecordId, SourceId, Strand};
use crate::Position;

/// A single annotation interval: one gene, transcript, or exon entry.
///
/// Coordinates are 0-based, half-open `[start, end)`. Records are immutable
/// after import; the bin index refers to them by id only and never copies
/// the record data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub id: RecordId,
    pub source: SourceId,
    pub chrom: String,
    pub start: Position,
    pub end: Position,
    pub strand: Strand,
    pub kind: FeatureKind,

    /// Display name; empty means unnamed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// External identifier (e.g. an Ensembl gene/transcript/exon id)
    pub accession: String,

    /// Gene group this record belongs to. Gene records carry their own
    /// group id here.
    pub gene_group: GroupId,

    /// Transcript group: a transcript record's own group id, or the parent
    /// transcript for exons. Absent on gene records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_group: Option<GroupId>,
}

impl IntervalRecord {
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Test whether this record overlaps the half-open window `[start, end)`.
    ///
    /// Bin-index query results are bin-granular supersets; callers needing
    /// exact window overlap apply this as a post-filter.
    #[must_use]
    pub fn overlaps(&self, start: Position, end: Position) -> bool {
        self.start < end && start < self.end
    }
}
