//! Line-oriented GTF (Gene Transfer Format) parsing.
//!
//! GTF carries nine tab-separated columns; the ninth is a semicolon-
//! separated list of `key "value"` attribute pairs. Coordinates in the file
//! are 1-based inclusive; the importer converts them to the internal
//! 0-based half-open model, not this parser.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::core::types::{FeatureKind, Strand};
use crate::Position;

#[derive(Debug, Error)]
pub enum GtfError {
    #[error("failed to read GTF: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 9 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: invalid coordinate '{value}'")]
    InvalidCoordinate { line: usize, value: String },

    #[error("line {line}: invalid strand '{value}'")]
    InvalidStrand { line: usize, value: String },

    #[error("line {line}: missing required attribute '{attribute}'")]
    MissingAttribute { line: usize, attribute: &'static str },
}

/// One parsed GTF feature line
#[derive(Debug, Clone, PartialEq)]
pub struct GtfRecord {
    pub seqname: String,
    pub feature: FeatureKind,

    /// 1-based inclusive, exactly as stored in the file
    pub start: Position,
    pub end: Position,

    pub strand: Strand,

    /// The mandatory `gene_id` attribute
    pub gene_id: String,

    /// `transcript_id` attribute; absent on gene-level features
    pub transcript_id: Option<String>,

    /// All attributes from the ninth column
    pub attributes: HashMap<String, String>,
}

impl GtfRecord {
    /// Parse one feature line. `line_no` is 1-based and used only for error
    /// reporting.
    ///
    /// # Errors
    ///
    /// Fails on a wrong column count, a non-numeric coordinate, an unknown
    /// strand symbol, or a missing `gene_id` attribute.
    pub fn parse(line: &str, line_no: usize) -> Result<Self, GtfError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 9 {
            return Err(GtfError::ColumnCount {
                line: line_no,
                found: fields.len(),
            });
        }

        let start = parse_coordinate(fields[3], line_no)?;
        let end = parse_coordinate(fields[4], line_no)?;
        let strand = Strand::from_str(fields[6]).map_err(|_| GtfError::InvalidStrand {
            line: line_no,
            value: fields[6].to_string(),
        })?;

        let attributes = parse_attributes(fields[8]);
        let gene_id = attributes
            .get("gene_id")
            .cloned()
            .ok_or(GtfError::MissingAttribute {
                line: line_no,
                attribute: "gene_id",
            })?;
        let transcript_id = attributes.get("transcript_id").cloned();

        Ok(Self {
            seqname: fields[0].to_string(),
            feature: FeatureKind::parse(fields[2]),
            start,
            end,
            strand,
            gene_id,
            transcript_id,
            attributes,
        })
    }

    /// Attribute accessor; returns `""` when the key is absent
    #[must_use]
    pub fn attribute(&self, key: &str) -> &str {
        self.attributes.get(key).map_or("", String::as_str)
    }
}

fn parse_coordinate(field: &str, line_no: usize) -> Result<Position, GtfError> {
    field.parse().map_err(|_| GtfError::InvalidCoordinate {
        line: line_no,
        value: field.to_string(),
    })
}

/// Split the ninth column into `key "value"` pairs. Quotes are stripped;
/// empty entries (trailing semicolons) are ignored.
fn parse_attributes(field: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    for entry in field.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if let Some((key, value)) = entry.split_once(' ') {
            attributes.insert(
                key.to_string(),
                value.trim().trim_matches('"').to_string(),
            );
        }
    }
    attributes
}

/// Read all feature records from a GTF file, transparently decompressing
/// `.gz` input.
///
/// # Errors
///
/// Fails on the first unreadable or malformed line.
pub fn read_gtf(path: &Path) -> Result<Vec<GtfRecord>, GtfError> {
    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    read_gtf_from(BufReader::new(reader))
}

/// Read feature records from any buffered reader. Comment lines (`#`) and
/// blank lines are skipped.
///
/// # Errors
///
/// Fails on the first unreadable or malformed line.
pub fn read_gtf_from<R: BufRead>(reader: R) -> Result<Vec<GtfRecord>, GtfError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        records.push(GtfRecord::parse(&line, i + 1)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXON_LINE: &str = "chr1\tHAVANA\texon\t11869\t12227\t.\t+\t.\tgene_id \"ENSG00000223972\"; transcript_id \"ENST00000456328\"; exon_id \"ENSE00002234944\";";

    #[test]
    fn test_parse_exon_line() {
        let record = GtfRecord::parse(EXON_LINE, 1).unwrap();
        assert_eq!(record.seqname, "chr1");
        assert_eq!(record.feature, FeatureKind::Exon);
        assert_eq!(record.start, 11_869);
        assert_eq!(record.end, 12_227);
        assert_eq!(record.strand, Strand::Forward);
        assert_eq!(record.gene_id, "ENSG00000223972");
        assert_eq!(record.transcript_id.as_deref(), Some("ENST00000456328"));
        assert_eq!(record.attribute("exon_id"), "ENSE00002234944");
        assert_eq!(record.attribute("gene_name"), "");
    }

    #[test]
    fn test_gene_line_has_no_transcript_id() {
        let line = "chr3\tHAVANA\tgene\t187721378\t187745727\t.\t-\t.\tgene_id \"ENSG00000113916\"; gene_name \"BCL6\";";
        let record = GtfRecord::parse(line, 1).unwrap();
        assert_eq!(record.feature, FeatureKind::Gene);
        assert_eq!(record.strand, Strand::Reverse);
        assert!(record.transcript_id.is_none());
        assert_eq!(record.attribute("gene_name"), "BCL6");
    }

    #[test]
    fn test_missing_gene_id_rejected() {
        let line = "chr1\tHAVANA\tgene\t1\t100\t.\t+\t.\tgene_name \"X\";";
        let err = GtfRecord::parse(line, 7).unwrap_err();
        assert!(matches!(
            err,
            GtfError::MissingAttribute { line: 7, attribute: "gene_id" }
        ));
    }

    #[test]
    fn test_bad_column_count() {
        let err = GtfRecord::parse("chr1\tonly\tthree", 2).unwrap_err();
        assert!(matches!(err, GtfError::ColumnCount { line: 2, found: 3 }));
    }

    #[test]
    fn test_bad_coordinate_and_strand() {
        let bad_coord = "chr1\tX\tgene\tabc\t100\t.\t+\t.\tgene_id \"G\";";
        assert!(matches!(
            GtfRecord::parse(bad_coord, 1).unwrap_err(),
            GtfError::InvalidCoordinate { .. }
        ));

        let bad_strand = "chr1\tX\tgene\t1\t100\t.\t?\t.\tgene_id \"G\";";
        assert!(matches!(
            GtfRecord::parse(bad_strand, 1).unwrap_err(),
            GtfError::InvalidStrand { .. }
        ));
    }

    #[test]
    fn test_reader_skips_comments_and_blanks() {
        let text = format!("#!genome-build GRCh38\n\n{EXON_LINE}\n");
        let records = read_gtf_from(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_unmodeled_feature_kind_parses() {
        let line = "chr1\tHAVANA\tCDS\t12010\t12057\t.\t+\t0\tgene_id \"G\"; transcript_id \"T\";";
        let record = GtfRecord::parse(line, 1).unwrap();
        assert_eq!(record.feature, FeatureKind::Other("CDS".to_string()));
    }
}
