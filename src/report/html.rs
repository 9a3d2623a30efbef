//! HTML reporter: a single self-contained page with inline CSS.

use super::{escape_html, ReportInput, Renderer};

const INLINE_CSS: &str = r#"body { font-family: Arial, sans-serif; margin: 20px; color: #333; }
table { border-collapse: collapse; width: 100%; margin: 20px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; vertical-align: top; }
th { background-color: #f2f2f2; font-weight: bold; }
tr:nth-child(even) { background-color: #f9f9f9; }
td.num { text-align: right; white-space: nowrap; }
td.code { font-family: monospace; white-space: pre-wrap; }
.stats span { margin-right: 24px; }
.summary { margin-bottom: 40px; }
"#;

/// Self-contained HTML reporter.
pub struct HtmlRenderer {
    pub title: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            title: "Exception Analysis Report".to_string(),
        }
    }

    fn write_statistics(html: &mut String, input: &ReportInput) {
        html.push_str("<h2>Statistics</h2>\n<p class=\"stats\">");
        html.push_str(&format!(
            "<span>Projects: <strong>{}</strong></span>",
            input.project_count()
        ));
        html.push_str(&format!(
            "<span>Files: <strong>{}</strong></span>",
            input.aggregates.file_count()
        ));
        html.push_str(&format!(
            "<span>Exceptions: <strong>{}</strong></span>",
            input.aggregates.total_exceptions()
        ));
        if input.stats.files_skipped > 0 {
            html.push_str(&format!(
                "<span>Files skipped: <strong>{}</strong></span>",
                input.stats.files_skipped
            ));
        }
        html.push_str("</p>\n");
    }

    fn write_totals(html: &mut String, input: &ReportInput) {
        html.push_str("<h2>Project Totals</h2>\n<table>\n");
        html.push_str("<tr><th>Project Name</th><th>Total Exceptions</th></tr>\n");
        for total in &input.aggregates.totals {
            html.push_str(&format!(
                "<tr><td>{}</td><td class=\"num\">{}</td></tr>\n",
                escape_html(&total.project_name),
                total.total_exceptions
            ));
        }
        html.push_str("</table>\n");
    }

    fn write_summaries(html: &mut String, input: &ReportInput) {
        html.push_str("<div class=\"summary\">\n<h2>Summary by Project and File</h2>\n<table>\n");
        html.push_str("<tr><th>Project Name</th><th>File Name</th><th>Exception Count</th></tr>\n");
        for summary in &input.aggregates.summaries {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td></tr>\n",
                escape_html(&summary.project_name),
                escape_html(&summary.file_name),
                summary.exception_count
            ));
        }
        html.push_str("</table>\n</div>\n");
    }

    fn write_records(html: &mut String, input: &ReportInput) {
        html.push_str("<h2>Detailed Exception Analysis</h2>\n<table>\n");
        html.push_str(
            "<tr><th>Project Name</th><th>File Name</th><th>Line</th>\
             <th>Exception Type</th><th>Exception Text</th></tr>\n",
        );
        for record in &input.aggregates.records {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td><td class=\"code\">{}</td></tr>\n",
                escape_html(&record.project_name),
                escape_html(&record.file_name),
                record.line_number,
                escape_html(&record.exception_type),
                escape_html(&record.exception_text)
            ));
        }
        html.push_str("</table>\n");
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HtmlRenderer {
    fn name(&self) -> &'static str {
        "html"
    }

    fn render(&self, input: &ReportInput) -> anyhow::Result<String> {
        let title = escape_html(&self.title);
        let mut html = String::with_capacity(8192 + input.aggregates.records.len() * 160);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", title));
        html.push_str("<style>\n");
        html.push_str(INLINE_CSS);
        html.push_str("</style>\n</head>\n<body>\n");

        html.push_str(&format!("<h1>{}</h1>\n", title));
        html.push_str(&format!(
            "<p>Generated on: {}</p>\n",
            escape_html(&input.generated_at)
        ));
        html.push_str(&format!(
            "<p>Mode: {}</p>\n",
            escape_html(input.policy.as_str())
        ));

        Self::write_statistics(&mut html, input);
        Self::write_totals(&mut html, input);
        Self::write_summaries(&mut html, input);
        Self::write_records(&mut html, input);

        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}
