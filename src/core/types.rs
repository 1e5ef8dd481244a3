use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Identifier of an annotation source in the catalog
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SourceId(pub u32);

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal record id.
///
/// Assigned at import time in ascending gene → transcript → exon order per
/// gene group. The query engines sort their output by this id, which is what
/// lets the tree builder run as a single forward pass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grouping key linking transcripts to their gene and exons to their
/// transcript
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GroupId(pub u64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strand of an annotation feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid strand '{0}': expected '+' or '-'")]
pub struct InvalidStrand(pub String);

impl FromStr for Strand {
    type Err = InvalidStrand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Forward),
            "-" => Ok(Self::Reverse),
            other => Err(InvalidStrand(other.to_string())),
        }
    }
}

/// Feature tag on an interval record.
///
/// The tree builder models the three named kinds; anything else is carried
/// as [`FeatureKind::Other`] and passes through reconstruction untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Gene,
    Transcript,
    Exon,
    Other(String),
}

impl FeatureKind {
    /// Parse a feature column value (e.g. from GTF), case-insensitively
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "gene" => Self::Gene,
            "transcript" => Self::Transcript,
            "exon" => Self::Exon,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gene => write!(f, "gene"),
            Self::Transcript => write!(f, "transcript"),
            Self::Exon => write!(f, "exon"),
            Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_roundtrip() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-".parse::<Strand>().unwrap(), Strand::Reverse);
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
    }

    #[test]
    fn test_strand_rejects_unknown() {
        let err = ".".parse::<Strand>().unwrap_err();
        assert_eq!(err, InvalidStrand(".".to_string()));
    }

    #[test]
    fn test_feature_kind_parse() {
        assert_eq!(FeatureKind::parse("gene"), FeatureKind::Gene);
        assert_eq!(FeatureKind::parse("Transcript"), FeatureKind::Transcript);
        assert_eq!(FeatureKind::parse("EXON"), FeatureKind::Exon);
        assert_eq!(
            FeatureKind::parse("CDS"),
            FeatureKind::Other("CDS".to_string())
        );
    }

    #[test]
    fn test_strand_serializes_as_symbol() {
        let json = serde_json::to_string(&Strand::Reverse).unwrap();
        assert_eq!(json, "\"-\"");
    }
}
