//! Parsers and import machinery for annotation data.

pub mod gtf;
pub mod import;
