//! Name and identifier substring queries.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::store::AnnotationCatalog;
use crate::core::record::IntervalRecord;
use crate::core::types::{GroupId, SourceId};

/// Searches records by display name or accession substring, expanding every
/// hit to its full gene group.
pub struct NameQuery<'a> {
    catalog: &'a AnnotationCatalog,
}

impl<'a> NameQuery<'a> {
    pub fn new(catalog: &'a AnnotationCatalog) -> Self {
        Self { catalog }
    }

    /// Case-insensitive substring match against display name or accession,
    /// restricted to `source`.
    ///
    /// Matching is group-expanding: the result holds *every* record of each
    /// gene group touched by any match, so a hit on a single exon id still
    /// returns the complete gene with all sibling transcripts and exons.
    /// Output is ordered by ascending gene-group id, then ascending record
    /// id within a group, which is the ordering the tree builder requires.
    #[must_use]
    pub fn find(&self, source: SourceId, pattern: &str) -> Vec<&'a IntervalRecord> {
        let needle = pattern.to_lowercase();

        let mut groups: BTreeSet<GroupId> = BTreeSet::new();
        for record in self.catalog.records_for_source(source) {
            if record.name.to_lowercase().contains(&needle)
                || record.accession.to_lowercase().contains(&needle)
            {
                groups.insert(record.gene_group);
            }
        }
        debug!("name query '{pattern}' touched {} gene groups", groups.len());

        let mut records = Vec::new();
        for group in groups {
            for &id in self.catalog.group_members(source, group) {
                if let Some(record) = self.catalog.get(id) {
                    records.push(record);
                }
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{FeatureKind, RecordId, Strand};

    fn record(
        id: u64,
        source: SourceId,
        kind: FeatureKind,
        name: &str,
        accession: &str,
        gene_group: u64,
    ) -> IntervalRecord {
        IntervalRecord {
            id: RecordId(id),
            source,
            chrom: "chr3".to_string(),
            start: 10 * id,
            end: 10 * id + 100,
            strand: Strand::Reverse,
            kind,
            name: name.to_string(),
            accession: accession.to_string(),
            gene_group: GroupId(gene_group),
            transcript_group: None,
        }
    }

    fn catalog() -> AnnotationCatalog {
        let mut catalog = AnnotationCatalog::new();
        let human = catalog.add_source("Human", "grch38", "gencode", "38");
        let mouse = catalog.add_source("Mouse", "grcm38", "gencode", "25");
        catalog.add_records(vec![
            record(1, human, FeatureKind::Gene, "BCL6", "ENSG00000113916", 1),
            record(2, human, FeatureKind::Transcript, "BCL6-201", "ENST00000232014", 1),
            record(3, human, FeatureKind::Exon, "", "ENSE00000936600", 1),
            record(4, human, FeatureKind::Gene, "TP53", "ENSG00000141510", 2),
            record(5, mouse, FeatureKind::Gene, "Bcl6", "ENSMUSG00000022508", 1),
        ]);
        catalog
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let catalog = catalog();
        let query = NameQuery::new(&catalog);

        let records = query.find(SourceId(0), "bcl6");
        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(1), RecordId(2), RecordId(3)]);
    }

    #[test]
    fn test_exon_accession_match_expands_to_whole_gene() {
        let catalog = catalog();
        let query = NameQuery::new(&catalog);

        // Only the exon's id matches, but the whole group comes back.
        let records = query.find(SourceId(0), "ENSE00000936600");
        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(1), RecordId(2), RecordId(3)]);
    }

    #[test]
    fn test_results_ordered_by_group_then_id() {
        let catalog = catalog();
        let query = NameQuery::new(&catalog);

        // "ENS" matches everything in the source; groups come back in
        // ascending group order, ids ascending within each.
        let records = query.find(SourceId(0), "ENS");
        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![RecordId(1), RecordId(2), RecordId(3), RecordId(4)]
        );
    }

    #[test]
    fn test_restricted_to_source() {
        let catalog = catalog();
        let query = NameQuery::new(&catalog);

        let records = query.find(SourceId(1), "bcl6");
        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(5)]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = catalog();
        let query = NameQuery::new(&catalog);
        assert!(query.find(SourceId(0), "MYC").is_empty());
    }
}
