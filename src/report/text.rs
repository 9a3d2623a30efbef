//! Plain-text reporter with fixed-width tables.

use std::fmt::Write;

use super::{ReportInput, Renderer};

pub struct TextRenderer;

/// Render rows as a table padded to the widest cell of each column.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            // Multi-line cells are measured by their first line.
            let len = cell.lines().next().unwrap_or("").chars().count();
            widths[i] = widths[i].max(len);
        }
    }

    let mut out = String::new();
    let line = |out: &mut String, cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
            .collect();
        out.push_str(padded.join("  ").trim_end());
        out.push('\n');
    };

    line(&mut out, headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(&mut out, rule.iter().map(|s| s.as_str()).collect());
    for row in rows {
        line(&mut out, row.iter().map(|s| s.as_str()).collect());
    }
    out
}

impl Renderer for TextRenderer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, input: &ReportInput) -> anyhow::Result<String> {
        let agg = input.aggregates;
        let mut out = String::new();

        writeln!(out, "Exception Analysis Report")?;
        writeln!(out, "=========================")?;
        writeln!(out, "Generated on: {}", input.generated_at)?;
        writeln!(out, "Mode: {}", input.policy)?;
        writeln!(
            out,
            "Projects: {}, Files: {}, Exceptions: {}",
            input.project_count(),
            agg.file_count(),
            agg.total_exceptions()
        )?;
        writeln!(out)?;

        writeln!(out, "Project Totals")?;
        let rows: Vec<Vec<String>> = agg
            .totals
            .iter()
            .map(|t| vec![t.project_name.clone(), t.total_exceptions.to_string()])
            .collect();
        out.push_str(&table(&["Project", "Total"], &rows));
        writeln!(out)?;

        writeln!(out, "Summary by Project and File")?;
        let rows: Vec<Vec<String>> = agg
            .summaries
            .iter()
            .map(|s| {
                vec![
                    s.project_name.clone(),
                    s.file_name.clone(),
                    s.exception_count.to_string(),
                ]
            })
            .collect();
        out.push_str(&table(&["Project", "File", "Count"], &rows));
        writeln!(out)?;

        writeln!(out, "Detailed Exception Analysis")?;
        let rows: Vec<Vec<String>> = agg
            .records
            .iter()
            .map(|r| {
                vec![
                    r.project_name.clone(),
                    r.file_name.clone(),
                    r.line_number.to_string(),
                    r.exception_type.clone(),
                    r.exception_text.clone(),
                ]
            })
            .collect();
        out.push_str(&table(&["Project", "File", "Line", "Type", "Text"], &rows));

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Aggregates, ExceptionRecord};
    use crate::analysis::ThrowPolicy;
    use crate::scan::ScanStats;

    #[test]
    fn test_table_alignment() {
        let rendered = table(
            &["Project", "Total"],
            &[
                vec!["a".to_string(), "1".to_string()],
                vec!["longer-name".to_string(), "12".to_string()],
            ],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Project      Total");
        assert_eq!(lines[1], "-----------  -----");
        assert_eq!(lines[2], "a            1");
        assert_eq!(lines[3], "longer-name  12");
    }

    #[test]
    fn test_text_report_sections() {
        let agg = Aggregates::from_records(vec![ExceptionRecord {
            project_name: "core".to_string(),
            file_name: "Parser.java".to_string(),
            exception_type: "ParseException".to_string(),
            exception_text: "(\"eof\", 0)".to_string(),
            line_number: 88,
        }]);
        let stats = ScanStats::default();
        let input = ReportInput::new(&agg, &stats, ThrowPolicy::Strict);

        let text = TextRenderer.render(&input).unwrap();
        assert!(text.starts_with("Exception Analysis Report\n"));
        assert!(text.contains("Mode: strict"));
        assert!(text.contains("Projects: 1, Files: 1, Exceptions: 1"));
        assert!(text.contains("core     Parser.java  88    ParseException  (\"eof\", 0)"));
    }
}
