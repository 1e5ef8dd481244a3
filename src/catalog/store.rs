//! The annotation catalog: owns every interval record plus the source and
//! chromosome metadata needed to resolve queries, and the pre-built bin
//! indexes that serve them.
//!
//! Records are bulk-loaded at import time and never mutated by queries, so
//! a loaded catalog is safe for unlimited concurrent reads.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::bins::{BinIndex, IndexError};
use crate::core::record::IntervalRecord;
use crate::core::types::{GroupId, RecordId, SourceId};
use crate::Position;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to build bin index: {0}")]
    Index(#[from] IndexError),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Default bin width used when the caller does not name one
pub const DEFAULT_BIN_WIDTH: Position = 16_384;

/// An annotation source: one genome/assembly/track/version combination
/// (e.g. Human/grch38/gencode). Immutable once created; every record and
/// bin index is scoped to exactly one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSource {
    pub id: SourceId,
    pub genome: String,
    pub assembly: String,
    pub track: String,
    pub version: String,
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub sources: Vec<TrackSource>,
    /// Bin widths the catalog serves queries at; indexes are rebuilt at
    /// these widths on load.
    pub bin_widths: Vec<Position>,
    pub records: Vec<IntervalRecord>,
}

/// The annotation catalog with query indexes
#[derive(Debug, Default)]
pub struct AnnotationCatalog {
    /// All records, in ascending id order
    records: Vec<IntervalRecord>,

    /// All annotation sources
    sources: Vec<TrackSource>,

    /// Chromosome names seen across loaded records
    chromosomes: BTreeSet<String>,

    /// Index: record id -> index in the records vec
    id_to_index: HashMap<RecordId, usize>,

    /// Index: (source, gene group) -> member record ids, ascending
    group_to_records: HashMap<(SourceId, GroupId), Vec<RecordId>>,

    /// Pre-built bin indexes keyed by (source, bin width)
    bin_indexes: HashMap<(SourceId, Position), BinIndex>,
}

impl AnnotationCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new annotation source and return its id
    pub fn add_source(
        &mut self,
        genome: impl Into<String>,
        assembly: impl Into<String>,
        track: impl Into<String>,
        version: impl Into<String>,
    ) -> SourceId {
        let id = SourceId(u32::try_from(self.sources.len()).unwrap_or(u32::MAX));
        self.sources.push(TrackSource {
            id,
            genome: genome.into(),
            assembly: assembly.into(),
            track: track.into(),
            version: version.into(),
        });
        id
    }

    /// Resolve a source by its genome/assembly/track triple,
    /// case-insensitively
    #[must_use]
    pub fn resolve_source(
        &self,
        genome: &str,
        assembly: &str,
        track: &str,
    ) -> Option<&TrackSource> {
        self.sources.iter().find(|s| {
            s.genome.eq_ignore_ascii_case(genome)
                && s.assembly.eq_ignore_ascii_case(assembly)
                && s.track.eq_ignore_ascii_case(track)
        })
    }

    #[must_use]
    pub fn source(&self, id: SourceId) -> Option<&TrackSource> {
        self.sources.get(id.0 as usize)
    }

    #[must_use]
    pub fn sources(&self) -> &[TrackSource] {
        &self.sources
    }

    /// Bulk-append records, updating the id, chromosome, and gene-group
    /// indexes. The records are expected in ascending id order, which the
    /// importer guarantees; the gene-group member lists inherit that order.
    pub fn add_records(&mut self, records: Vec<IntervalRecord>) {
        for record in records {
            let index = self.records.len();
            self.id_to_index.insert(record.id, index);
            self.chromosomes.insert(record.chrom.clone());
            self.group_to_records
                .entry((record.source, record.gene_group))
                .or_default()
                .push(record.id);
            self.records.push(record);
        }
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&IntervalRecord> {
        self.id_to_index.get(&id).map(|&idx| &self.records[idx])
    }

    #[must_use]
    pub fn records(&self) -> &[IntervalRecord] {
        &self.records
    }

    /// Iterate the records belonging to one source
    pub fn records_for_source(
        &self,
        source: SourceId,
    ) -> impl Iterator<Item = &IntervalRecord> {
        self.records.iter().filter(move |r| r.source == source)
    }

    /// All member record ids of a gene group, ascending; empty if the group
    /// is unknown
    #[must_use]
    pub fn group_members(&self, source: SourceId, group: GroupId) -> &[RecordId] {
        self.group_to_records
            .get(&(source, group))
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn has_chromosome(&self, name: &str) -> bool {
        self.chromosomes.contains(name)
    }

    /// Chromosome names seen across loaded records, sorted
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.chromosomes.iter().map(String::as_str)
    }

    /// Build (or fully replace) the bin index for `source` at `width`.
    ///
    /// # Errors
    ///
    /// Fails with [`CatalogError::Index`] on a zero width or a record with
    /// an inverted range; a failed build leaves no partial index behind.
    pub fn build_bin_index(
        &mut self,
        source: SourceId,
        width: Position,
    ) -> Result<(), CatalogError> {
        let index = BinIndex::build(self.records_for_source(source), width)?;
        debug!(
            "built bin index for source {source} at width {width}: {} bins",
            index.len()
        );
        self.bin_indexes.insert((source, width), index);
        Ok(())
    }

    /// Look up the pre-built bin index for `(source, width)`.
    ///
    /// The catalog only serves queries at widths built ahead of time; there
    /// is no on-demand construction here.
    #[must_use]
    pub fn bin_index(&self, source: SourceId, width: Position) -> Option<&BinIndex> {
        self.bin_indexes.get(&(source, width))
    }

    /// Distinct bin widths with at least one built index, sorted
    #[must_use]
    pub fn bin_widths(&self) -> Vec<Position> {
        let widths: BTreeSet<Position> =
            self.bin_indexes.keys().map(|&(_, width)| width).collect();
        widths.into_iter().collect()
    }

    /// Number of records in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load a catalog from a JSON file, rebuilding the query indexes and
    /// the bin indexes at the widths recorded in the file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or if an index rebuild
    /// hits invalid record data.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let data: CatalogData = serde_json::from_reader(reader)?;
        Self::from_data(data)
    }

    /// Rebuild a catalog from its serializable form.
    ///
    /// # Errors
    ///
    /// Fails if a bin index cannot be rebuilt from the stored records.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        if data.version != CATALOG_VERSION {
            warn!(
                "catalog version mismatch (expected {CATALOG_VERSION}, found {})",
                data.version
            );
        }

        let mut catalog = Self::new();
        catalog.sources = data.sources;
        catalog.add_records(data.records);

        let source_ids: Vec<SourceId> = catalog.sources.iter().map(|s| s.id).collect();
        for source in source_ids {
            for &width in &data.bin_widths {
                catalog.build_bin_index(source, width)?;
            }
        }

        Ok(catalog)
    }

    /// Serialize the catalog to its storable form. Bin and group indexes
    /// are not serialized; they are rebuilt on load.
    #[must_use]
    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            sources: self.sources.clone(),
            bin_widths: self.bin_widths(),
            records: self.records.clone(),
        }
    }

    /// Save the catalog to a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be created or written.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.to_data())?;
        Ok(())
    }
}
