//! Error types for scanning and report output.
//!
//! Every variant names the unit it belongs to (a file, a project, an
//! output), so callers can log it and carry on with the next unit.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning projects or writing reports.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("parser setup failed: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("no analyzer registered for extension {0:?}")]
    UnsupportedExtension(String),
    #[error("error walking project {project}: {source}")]
    Walk {
        project: String,
        #[source]
        source: walkdir::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("error generating {output}: {source}")]
    Output {
        output: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
