//! Discovery and scanning of projects under a root directory.

mod filter;
mod project;
mod runner;

pub use filter::PathFilter;
pub use project::{ProjectScan, ProjectScanner};
pub use runner::{list_projects, Project, Runner};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::aggregate::{Aggregates, ExceptionRecord};
use crate::analysis::ThrowPolicy;

/// How a record identifies the file it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FileKey {
    /// Base name only. Same-named files in one project share a summary row.
    #[default]
    FileName,
    /// Path relative to the project directory.
    RelativePath,
}

/// Settings the scanners need.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub policy: ThrowPolicy,
    pub file_key: FileKey,
    pub parallel: bool,
    /// Leave out root subdirectories whose name starts with a dot.
    pub skip_hidden_projects: bool,
    pub filter: PathFilter,
}

/// A file that was eligible but could not be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// A project whose directory walk failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedProject {
    pub name: String,
    pub reason: String,
}

/// Counters describing a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub projects_scanned: usize,
    pub projects_failed: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

/// Result of a full run, before aggregation.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Merged records of every project, in no particular order.
    pub records: Vec<ExceptionRecord>,
    pub stats: ScanStats,
    pub skipped_files: Vec<SkippedFile>,
    pub failed_projects: Vec<FailedProject>,
}

impl ScanOutcome {
    /// Aggregate the merged records.
    pub fn aggregate(&self) -> Aggregates {
        Aggregates::from_records(self.records.clone())
    }
}
