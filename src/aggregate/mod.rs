//! Aggregation of throw-site records into report-ready collections.
//!
//! ```text
//! records (any order) ──▶ Aggregates::from_records ──▶ sorted records
//!                                                   ├─▶ per-file summaries
//!                                                   ├─▶ per-project totals
//!                                                   └─▶ unique-text catalogue
//! ```
//!
//! Every collection is derived from the final merged record list in one
//! call. Nothing is accumulated incrementally.

mod order;
mod record;

pub use order::{compare_records, compare_summaries, compare_totals, sort_records, UniqueTexts};
pub use record::{
    render_arguments, ExceptionRecord, ProjectSummary, ProjectTotal, EMPTY_ARGUMENTS,
    UNKNOWN_EXCEPTION_TYPE,
};

use serde::Serialize;
use std::collections::HashMap;

/// All aggregates of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    /// Every record, sorted by project, file, line.
    pub records: Vec<ExceptionRecord>,
    /// Record counts per `(project, file)`, sorted by project then file.
    pub summaries: Vec<ProjectSummary>,
    /// Record counts per project, sorted by project.
    pub totals: Vec<ProjectTotal>,
    /// Distinct non-blank exception texts, sorted lexically.
    pub catalogue: Vec<String>,
}

impl Aggregates {
    /// Compute every aggregate from the merged record list.
    ///
    /// The input order does not matter except as the final tie-break for
    /// records with identical project, file and line.
    pub fn from_records(mut records: Vec<ExceptionRecord>) -> Self {
        // Catalogue insertion order follows discovery, before sorting.
        let catalogue = records
            .iter()
            .map(|r| r.exception_text.as_str())
            .collect::<UniqueTexts>()
            .into_sorted();

        sort_records(&mut records);

        let mut file_counts: HashMap<(&str, &str), usize> = HashMap::new();
        let mut project_counts: HashMap<&str, usize> = HashMap::new();
        for record in &records {
            *file_counts
                .entry((record.project_name.as_str(), record.file_name.as_str()))
                .or_insert(0) += 1;
            *project_counts.entry(record.project_name.as_str()).or_insert(0) += 1;
        }

        let mut summaries: Vec<ProjectSummary> = file_counts
            .into_iter()
            .map(|((project, file), count)| ProjectSummary {
                project_name: project.to_string(),
                file_name: file.to_string(),
                exception_count: count,
            })
            .collect();
        summaries.sort_by(compare_summaries);

        let mut totals: Vec<ProjectTotal> = project_counts
            .into_iter()
            .map(|(project, count)| ProjectTotal {
                project_name: project.to_string(),
                total_exceptions: count,
            })
            .collect();
        totals.sort_by(compare_totals);

        Self {
            records,
            summaries,
            totals,
            catalogue,
        }
    }

    /// Total number of records.
    pub fn total_exceptions(&self) -> usize {
        self.records.len()
    }

    /// Number of distinct `(project, file)` keys.
    pub fn file_count(&self) -> usize {
        self.summaries.len()
    }

    /// Number of projects with at least one record.
    pub fn project_count(&self) -> usize {
        self.totals.len()
    }

    /// Total for one project, 0 if it has no records.
    pub fn total_for(&self, project: &str) -> usize {
        self.totals
            .binary_search_by(|t| t.project_name.as_str().cmp(project))
            .map(|i| self.totals[i].total_exceptions)
            .unwrap_or(0)
    }

    /// Summaries belonging to one project.
    pub fn summaries_for<'a>(&'a self, project: &'a str) -> impl Iterator<Item = &'a ProjectSummary> {
        self.summaries.iter().filter(move |s| s.project_name == project)
    }

    /// Records with the unknown-type sentinel.
    pub fn rethrow_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_rethrow()).count()
    }
}
