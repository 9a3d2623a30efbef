//! Output formatting for scan results.
//!
//! Report backends implement [`Renderer`] and only see a [`ReportInput`]:
//! - HTML: self-contained page with statistics and three tables
//! - JSON: every aggregate, for programmatic consumption
//! - Text: fixed-width tables
//!
//! The unique-text catalogue and the console summary are separate outputs.

mod catalogue;
mod console;
mod html;
mod json;
mod text;

pub use catalogue::render_catalogue;
pub use console::write_pretty;
pub use html::HtmlRenderer;
pub use json::{JsonReport, JsonRenderer, JsonStatistics};
pub use text::TextRenderer;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::aggregate::Aggregates;
use crate::analysis::ThrowPolicy;
use crate::error::{Result, ScanError};
use crate::scan::ScanStats;

/// Timestamp format used in every output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Report backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
    Text,
}

impl ReportFormat {
    /// File extension for reports in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }
}

/// Everything a renderer may use.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub aggregates: &'a Aggregates,
    pub stats: &'a ScanStats,
    pub policy: ThrowPolicy,
    /// Formatted with [`TIMESTAMP_FORMAT`].
    pub generated_at: String,
}

impl<'a> ReportInput<'a> {
    pub fn new(aggregates: &'a Aggregates, stats: &'a ScanStats, policy: ThrowPolicy) -> Self {
        Self {
            aggregates,
            stats,
            policy,
            generated_at: timestamp(),
        }
    }

    /// Projects analysed, including those without any throw site.
    pub fn project_count(&self) -> usize {
        self.stats.projects_scanned.max(self.aggregates.project_count())
    }
}

/// Trait for report generation.
pub trait Renderer: Send + Sync {
    fn name(&self) -> &'static str;
    fn render(&self, input: &ReportInput) -> anyhow::Result<String>;
}

/// Create a renderer for a format.
pub fn create_renderer(format: ReportFormat) -> Box<dyn Renderer> {
    match format {
        ReportFormat::Html => Box::new(HtmlRenderer::new()),
        ReportFormat::Json => Box::new(JsonRenderer),
        ReportFormat::Text => Box::new(TextRenderer),
    }
}

/// Current local time formatted with [`TIMESTAMP_FORMAT`].
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Escape text for embedding in HTML element content or attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Write one output file, creating its directory if needed.
///
/// `label` names the output in the error ("HTML report", "catalogue").
pub fn write_output(path: &Path, contents: &str, label: &str) -> Result<()> {
    let to_err = |source: std::io::Error| ScanError::Output {
        output: format!("{} {}", label, path.display()),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(to_err)?;
        }
    }
    fs::write(path, contents).map_err(to_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ReportFormat::Html.extension(), "html");
        assert_eq!(ReportFormat::Json.extension(), "json");
        assert_eq!(ReportFormat::Text.extension(), "txt");
        assert_eq!(create_renderer(ReportFormat::Json).name(), "json");
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }

    #[test]
    fn test_write_output_creates_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/out/report.html");
        write_output(&path, "<html></html>", "HTML report").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_output_error_names_output() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should go.
        let path = temp.path().join("taken");
        fs::create_dir_all(&path).unwrap();
        let err = write_output(&path, "x", "catalogue").unwrap_err();
        assert!(err.to_string().starts_with("error generating catalogue"));
    }
}
