//! JSON reporter.

use serde::{Deserialize, Serialize};

use super::{ReportInput, Renderer};
use crate::aggregate::{ExceptionRecord, ProjectSummary, ProjectTotal};

/// JSON report document.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub generated_at: String,
    pub mode: String,
    pub statistics: JsonStatistics,
    pub project_totals: Vec<ProjectTotal>,
    pub project_summaries: Vec<ProjectSummary>,
    pub exceptions: Vec<ExceptionRecord>,
    pub unique_exception_texts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonStatistics {
    pub total_projects: usize,
    pub total_files: usize,
    pub total_exceptions: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub projects_failed: usize,
}

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, input: &ReportInput) -> anyhow::Result<String> {
        let agg = input.aggregates;
        let report = JsonReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: input.generated_at.clone(),
            mode: input.policy.to_string(),
            statistics: JsonStatistics {
                total_projects: input.project_count(),
                total_files: agg.file_count(),
                total_exceptions: agg.total_exceptions(),
                files_scanned: input.stats.files_scanned,
                files_skipped: input.stats.files_skipped,
                projects_failed: input.stats.projects_failed,
            },
            project_totals: agg.totals.clone(),
            project_summaries: agg.summaries.clone(),
            exceptions: agg.records.clone(),
            unique_exception_texts: agg.catalogue.clone(),
        };

        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregates;
    use crate::analysis::ThrowPolicy;
    use crate::scan::ScanStats;

    #[test]
    fn test_json_round_trips_aggregates() {
        let agg = Aggregates::from_records(vec![
            ExceptionRecord {
                project_name: "api".to_string(),
                file_name: "Users.java".to_string(),
                exception_type: "NotFoundException".to_string(),
                exception_text: "(id)".to_string(),
                line_number: 30,
            },
            ExceptionRecord {
                project_name: "api".to_string(),
                file_name: "Users.java".to_string(),
                exception_type: "Unknown".to_string(),
                exception_text: "e".to_string(),
                line_number: 12,
            },
        ]);
        let stats = ScanStats {
            projects_scanned: 1,
            files_scanned: 3,
            files_skipped: 1,
            projects_failed: 0,
        };
        let input = ReportInput::new(&agg, &stats, ThrowPolicy::Inclusive);

        let json = JsonRenderer.render(&input).unwrap();
        let report: JsonReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report.mode, "inclusive");
        assert_eq!(report.statistics.total_exceptions, 2);
        assert_eq!(report.statistics.total_files, 1);
        assert_eq!(report.statistics.files_skipped, 1);
        assert_eq!(report.exceptions, agg.records);
        assert_eq!(report.exceptions[0].line_number, 12);
        assert_eq!(report.project_totals[0].total_exceptions, 2);
        assert_eq!(report.unique_exception_texts, vec!["(id)", "e"]);
    }
}
