//! Conversion of parsed GTF records into catalog interval records.
//!
//! The importer is where the ordering invariant the query engines depend on
//! is established: record ids are assigned ascending, each gene first, then
//! each of its transcripts immediately followed by that transcript's exons.
//! Gene groups are emitted in first-seen file order.
//!
//! Coordinates are converted here from GTF's 1-based inclusive convention
//! to the internal 0-based half-open model.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::core::record::IntervalRecord;
use crate::core::types::{FeatureKind, GroupId, RecordId, SourceId};
use crate::parsing::gtf::GtfRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("gene group '{0}' has no gene record")]
    MissingGene(String),

    #[error("transcript '{0}' is referenced by exons but has no transcript record")]
    MissingTranscript(String),

    #[error("gene '{0}' appears more than once")]
    DuplicateGene(String),

    #[error("transcript '{0}' appears more than once")]
    DuplicateTranscript(String),

    #[error("{kind} record in gene '{gene_id}' has no transcript_id attribute")]
    MissingTranscriptId { kind: FeatureKind, gene_id: String },

    #[error("record '{accession}' has a zero start coordinate (GTF is 1-based)")]
    ZeroStart { accession: String },

    #[error("record '{accession}' has end ({end}) before start ({start})")]
    InvalidInterval {
        accession: String,
        start: u64,
        end: u64,
    },
}

#[derive(Default)]
struct TranscriptDraft<'a> {
    transcript: Option<&'a GtfRecord>,
    exons: Vec<&'a GtfRecord>,
}

#[derive(Default)]
struct GeneDraft<'a> {
    gene: Option<&'a GtfRecord>,
    transcripts: Vec<(String, TranscriptDraft<'a>)>,
    by_transcript_id: HashMap<&'a str, usize>,
}

/// Converts parsed GTF records into catalog interval records with the id
/// ordering the engines rely on.
///
/// One importer can serve several sources in sequence; record and group
/// ids keep ascending across calls so a catalog holding multiple sources
/// stays totally ordered.
pub struct RecordImporter {
    next_record: u64,
    next_group: u64,
}

impl Default for RecordImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordImporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_record: 1,
            next_group: 1,
        }
    }

    /// Import one source's GTF records.
    ///
    /// Feature kinds other than gene/transcript/exon are skipped. The
    /// output upholds the catalog invariants: every transcript's gene group
    /// resolves to a gene record, every exon's transcript group to a
    /// transcript record.
    ///
    /// # Errors
    ///
    /// Fails on structural faults in the annotation: a transcript or exon
    /// referencing a gene with no gene record, exons referencing a
    /// transcript with no transcript record, duplicate gene or transcript
    /// entries, missing `transcript_id` attributes, or invalid coordinates.
    pub fn import(
        &mut self,
        gtf: &[GtfRecord],
        source: SourceId,
    ) -> Result<Vec<IntervalRecord>, ImportError> {
        let mut genes: Vec<(String, GeneDraft)> = Vec::new();
        let mut by_gene_id: HashMap<&str, usize> = HashMap::new();
        let mut skipped = 0usize;

        for record in gtf {
            let gene_at = *by_gene_id
                .entry(record.gene_id.as_str())
                .or_insert_with(|| {
                    genes.push((record.gene_id.clone(), GeneDraft::default()));
                    genes.len() - 1
                });
            let draft = &mut genes[gene_at].1;

            match &record.feature {
                FeatureKind::Gene => {
                    if draft.gene.replace(record).is_some() {
                        return Err(ImportError::DuplicateGene(record.gene_id.clone()));
                    }
                }
                FeatureKind::Transcript => {
                    let slot = transcript_slot(draft, record)?;
                    if slot.transcript.replace(record).is_some() {
                        return Err(ImportError::DuplicateTranscript(
                            record.transcript_id.clone().unwrap_or_default(),
                        ));
                    }
                }
                FeatureKind::Exon => {
                    let slot = transcript_slot(draft, record)?;
                    slot.exons.push(record);
                }
                FeatureKind::Other(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("skipped {skipped} records of unmodeled feature kinds");
        }

        let mut records = Vec::new();
        for (gene_id, draft) in genes {
            let gene = draft.gene.ok_or(ImportError::MissingGene(gene_id))?;
            let gene_group = self.alloc_group();
            records.push(self.interval(
                gene,
                source,
                gene_group,
                None,
                gene.attribute("gene_name"),
                &gene.gene_id,
            )?);

            for (transcript_id, slot) in draft.transcripts {
                let transcript = slot
                    .transcript
                    .ok_or_else(|| ImportError::MissingTranscript(transcript_id.clone()))?;
                let transcript_group = self.alloc_group();
                records.push(self.interval(
                    transcript,
                    source,
                    gene_group,
                    Some(transcript_group),
                    transcript.attribute("transcript_name"),
                    &transcript_id,
                )?);

                for exon in slot.exons {
                    records.push(self.interval(
                        exon,
                        source,
                        gene_group,
                        Some(transcript_group),
                        "",
                        exon.attribute("exon_id"),
                    )?);
                }
            }
        }

        debug!("imported {} records for source {source}", records.len());
        Ok(records)
    }

    fn alloc_group(&mut self) -> GroupId {
        let group = GroupId(self.next_group);
        self.next_group += 1;
        group
    }

    fn interval(
        &mut self,
        gtf: &GtfRecord,
        source: SourceId,
        gene_group: GroupId,
        transcript_group: Option<GroupId>,
        name: &str,
        accession: &str,
    ) -> Result<IntervalRecord, ImportError> {
        if gtf.start == 0 {
            return Err(ImportError::ZeroStart {
                accession: accession.to_string(),
            });
        }
        if gtf.end < gtf.start {
            return Err(ImportError::InvalidInterval {
                accession: accession.to_string(),
                start: gtf.start,
                end: gtf.end,
            });
        }

        let id = RecordId(self.next_record);
        self.next_record += 1;

        Ok(IntervalRecord {
            id,
            source,
            chrom: gtf.seqname.clone(),
            // 1-based inclusive -> 0-based half-open
            start: gtf.start - 1,
            end: gtf.end,
            strand: gtf.strand,
            kind: gtf.feature.clone(),
            name: name.to_string(),
            accession: accession.to_string(),
            gene_group,
            transcript_group,
        })
    }
}

fn transcript_slot<'a, 'd>(
    draft: &'d mut GeneDraft<'a>,
    record: &'a GtfRecord,
) -> Result<&'d mut TranscriptDraft<'a>, ImportError> {
    let transcript_id =
        record
            .transcript_id
            .as_deref()
            .ok_or_else(|| ImportError::MissingTranscriptId {
                kind: record.feature.clone(),
                gene_id: record.gene_id.clone(),
            })?;

    let at = *draft
        .by_transcript_id
        .entry(transcript_id)
        .or_insert_with(|| {
            draft
                .transcripts
                .push((transcript_id.to_string(), TranscriptDraft::default()));
            draft.transcripts.len() - 1
        });

    Ok(&mut draft.transcripts[at].1)
}
