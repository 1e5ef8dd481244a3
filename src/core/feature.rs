//! Output node shapes for reconstructed feature trees.
//!
//! These are the structures an external serializer renders: a gene holds
//! its transcripts, a transcript holds its exons. Field names are part of
//! the output contract.

use serde::{Deserialize, Serialize};

use crate::core::record::IntervalRecord;
use crate::core::types::Strand;

/// A reconstructed gene with its transcripts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneNode {
    pub location: String,
    pub strand: Strand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub gene_id: String,
    pub transcripts: Vec<TranscriptNode>,
}

/// A transcript with its exons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptNode {
    pub location: String,
    pub strand: Strand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub transcript_id: String,
    pub exons: Vec<ExonNode>,
}

/// A single exon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExonNode {
    pub location: String,
    pub strand: Strand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exon_id: String,
}

/// Render the display location of a record, `"{chrom}:{start}-{end}"`.
///
/// Start and end are the record's raw stored coordinates (0-based,
/// half-open); no display-convention adjustment is applied here.
fn display_location(record: &IntervalRecord) -> String {
    format!("{}:{}-{}", record.chrom, record.start, record.end)
}

fn display_name(record: &IntervalRecord) -> Option<String> {
    if record.is_named() {
        Some(record.name.clone())
    } else {
        None
    }
}

impl GeneNode {
    #[must_use]
    pub fn from_record(record: &IntervalRecord) -> Self {
        Self {
            location: display_location(record),
            strand: record.strand,
            name: display_name(record),
            gene_id: record.accession.clone(),
            transcripts: Vec::new(),
        }
    }
}

impl TranscriptNode {
    #[must_use]
    pub fn from_record(record: &IntervalRecord) -> Self {
        Self {
            location: display_location(record),
            strand: record.strand,
            name: display_name(record),
            transcript_id: record.accession.clone(),
            exons: Vec::new(),
        }
    }
}

impl ExonNode {
    #[must_use]
    pub fn from_record(record: &IntervalRecord) -> Self {
        Self {
            location: display_location(record),
            strand: record.strand,
            name: display_name(record),
            exon_id: record.accession.clone(),
        }
    }
}
