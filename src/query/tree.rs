//! Reconstruction of gene → transcript → exon trees from flat record lists.

use thiserror::Error;

use crate::core::feature::{ExonNode, GeneNode, TranscriptNode};
use crate::core::record::IntervalRecord;
use crate::core::types::{FeatureKind, RecordId};

/// Data-integrity faults raised when the input violates the required
/// gene-before-transcript-before-exon ordering. These signal a broken
/// upstream (ordering or id assignment), not "no results".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("transcript record {0} has no preceding gene")]
    OrphanTranscript(RecordId),

    #[error("exon record {0} has no preceding transcript")]
    OrphanExon(RecordId),
}

/// Rebuild the feature hierarchy from a flat, ordered record sequence.
///
/// A single forward pass keeping last-seen state: a gene record starts a
/// new tree (and clears the current transcript), a transcript attaches to
/// the last gene, an exon to the last transcript. Kinds the tree shape does
/// not model are skipped. There is no backtracking or lookahead: the
/// ascending-id ordering produced by the query engines is a correctness
/// precondition here, not an optimization.
///
/// The input must also already be deduplicated: a duplicate gene record
/// would start a second tree with no merge back into the first. The
/// engines' id-set deduplication guarantees this.
///
/// # Errors
///
/// Returns [`TreeError::OrphanTranscript`] or [`TreeError::OrphanExon`]
/// when a child record arrives without its parent, which means the caller
/// violated the ordering contract.
pub fn assemble_genes<'a, I>(records: I) -> Result<Vec<GeneNode>, TreeError>
where
    I: IntoIterator<Item = &'a IntervalRecord>,
{
    let mut genes: Vec<GeneNode> = Vec::new();
    // Indexes of the current transcript's (gene, transcript) slots.
    let mut transcript: Option<(usize, usize)> = None;

    for record in records {
        match &record.kind {
            FeatureKind::Gene => {
                genes.push(GeneNode::from_record(record));
                transcript = None;
            }
            FeatureKind::Transcript => {
                let gene_at = genes
                    .len()
                    .checked_sub(1)
                    .ok_or(TreeError::OrphanTranscript(record.id))?;
                let gene = &mut genes[gene_at];
                gene.transcripts.push(TranscriptNode::from_record(record));
                transcript = Some((gene_at, gene.transcripts.len() - 1));
            }
            FeatureKind::Exon => {
                let (gene_at, transcript_at) =
                    transcript.ok_or(TreeError::OrphanExon(record.id))?;
                genes[gene_at].transcripts[transcript_at]
                    .exons
                    .push(ExonNode::from_record(record));
            }
            FeatureKind::Other(_) => {}
        }
    }

    Ok(genes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GroupId, SourceId, Strand};
    use crate::Position;

    fn record(id: u64, kind: FeatureKind, start: Position, end: Position) -> IntervalRecord {
        IntervalRecord {
            id: RecordId(id),
            source: SourceId(0),
            chrom: "chr1".to_string(),
            start,
            end,
            strand: Strand::Forward,
            kind,
            name: String::new(),
            accession: format!("ACC{id}"),
            gene_group: GroupId(1),
            transcript_group: None,
        }
    }

    #[test]
    fn test_single_gene_transcript_exon() {
        let records = vec![
            record(1, FeatureKind::Gene, 1, 100),
            record(2, FeatureKind::Transcript, 10, 50),
            record(3, FeatureKind::Exon, 10, 20),
        ];

        let genes = assemble_genes(&records).unwrap();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].transcripts.len(), 1);
        assert_eq!(genes[0].transcripts[0].exons.len(), 1);
        assert_eq!(genes[0].transcripts[0].exons[0].exon_id, "ACC3");
    }

    #[test]
    fn test_multiple_transcripts_per_gene() {
        let records = vec![
            record(1, FeatureKind::Gene, 0, 1_000),
            record(2, FeatureKind::Transcript, 0, 400),
            record(3, FeatureKind::Exon, 0, 100),
            record(4, FeatureKind::Exon, 200, 300),
            record(5, FeatureKind::Transcript, 500, 900),
            record(6, FeatureKind::Exon, 500, 600),
        ];

        let genes = assemble_genes(&records).unwrap();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].transcripts.len(), 2);
        assert_eq!(genes[0].transcripts[0].exons.len(), 2);
        assert_eq!(genes[0].transcripts[1].exons.len(), 1);
    }

    #[test]
    fn test_consecutive_genes_interleaved() {
        // Overlapping genes still reconstruct correctly as long as each
        // gene's children follow it before the next gene starts.
        let records = vec![
            record(1, FeatureKind::Gene, 0, 500),
            record(2, FeatureKind::Transcript, 0, 400),
            record(3, FeatureKind::Gene, 300, 800),
            record(4, FeatureKind::Transcript, 300, 700),
            record(5, FeatureKind::Exon, 300, 350),
        ];

        let genes = assemble_genes(&records).unwrap();
        assert_eq!(genes.len(), 2);
        assert_eq!(genes[0].transcripts.len(), 1);
        assert!(genes[0].transcripts[0].exons.is_empty());
        assert_eq!(genes[1].transcripts[0].exons.len(), 1);
    }

    #[test]
    fn test_orphan_transcript() {
        let records = vec![record(2, FeatureKind::Transcript, 10, 50)];
        let err = assemble_genes(&records).unwrap_err();
        assert_eq!(err, TreeError::OrphanTranscript(RecordId(2)));
    }

    #[test]
    fn test_orphan_exon() {
        let records = vec![
            record(1, FeatureKind::Gene, 1, 100),
            record(3, FeatureKind::Exon, 10, 20),
        ];
        let err = assemble_genes(&records).unwrap_err();
        assert_eq!(err, TreeError::OrphanExon(RecordId(3)));
    }

    #[test]
    fn test_new_gene_resets_transcript_state() {
        // An exon right after a fresh gene cannot belong to the previous
        // gene's transcript; it must fault rather than mis-attach.
        let records = vec![
            record(1, FeatureKind::Gene, 0, 100),
            record(2, FeatureKind::Transcript, 0, 50),
            record(3, FeatureKind::Gene, 200, 300),
            record(4, FeatureKind::Exon, 200, 250),
        ];
        let err = assemble_genes(&records).unwrap_err();
        assert_eq!(err, TreeError::OrphanExon(RecordId(4)));
    }

    #[test]
    fn test_unrecognized_kind_skipped() {
        let records = vec![
            record(1, FeatureKind::Gene, 1, 100),
            record(2, FeatureKind::Other("CDS".to_string()), 10, 40),
            record(3, FeatureKind::Transcript, 10, 50),
        ];

        let genes = assemble_genes(&records).unwrap();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].transcripts.len(), 1);
    }

    #[test]
    fn test_empty_input_is_empty_tree() {
        let genes = assemble_genes([]).unwrap();
        assert!(genes.is_empty());
    }
}
