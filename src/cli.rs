//! Command-line interface for throwscan.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::analysis::ThrowPolicy;
use crate::config::Config;
use crate::report::{self, ReportFormat, ReportInput};
use crate::scan::{FileKey, Runner};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Inventory the exceptions thrown across a directory of Java projects.
///
/// Every immediate subdirectory of ROOT is a project. Each throw site found
/// in its source files becomes a record; the records are aggregated per file
/// and per project and written to an HTML (or JSON / text) report, plus an
/// optional catalogue of distinct exception texts.
#[derive(Parser, Debug)]
#[command(name = "throwscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory whose subdirectories are the projects to scan
    pub root: PathBuf,

    /// Throw classification: strict (constructions only) or inclusive
    #[arg(short, long, value_enum)]
    pub mode: Option<ThrowPolicy>,

    /// Write the unique exception text catalogue
    #[arg(long, conflicts_with = "no_catalogue")]
    pub catalogue: bool,

    /// Do not write the unique exception text catalogue
    #[arg(long)]
    pub no_catalogue: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Directory for the output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// How records identify their source file
    #[arg(long, value_enum)]
    pub file_key: Option<FileKey>,

    /// Scan on a single thread
    #[arg(long)]
    pub no_parallel: bool,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.catalogue {
            config.catalogue = Some(true);
        }
        if self.no_catalogue {
            config.catalogue = Some(false);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(key) = self.file_key {
            config.file_key = key;
        }
        if self.no_parallel {
            config.parallel = false;
        }
    }
}

/// Load the explicit config file, or one discovered in the working directory.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Ok(Config::parse_file(path)?);
    }
    let cwd = std::env::current_dir()?;
    match Config::discover(&cwd) {
        Some(path) => {
            tracing::info!(config = %path.display(), "Using config file");
            Ok(Config::parse_file(&path)?)
        }
        None => Ok(Config::default()),
    }
}

/// Run a scan and write its outputs. Returns the process exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    if !cli.root.is_dir() {
        eprintln!("Directory does not exist: {}", cli.root.display());
        return Ok(EXIT_ERROR);
    }

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    cli.apply_overrides(&mut config);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }

    let emit_catalogue = config.emit_catalogue();
    tracing::info!(
        mode = %config.mode,
        catalogue = emit_catalogue,
        format = ?config.format,
        file_key = ?config.file_key,
        "Starting analysis"
    );

    let runner = Runner::new(config.scan_options()?);
    let outcome = runner.run(&cli.root)?;
    let aggregates = outcome.aggregate();

    let input = ReportInput::new(&aggregates, &outcome.stats, config.mode);
    let mut written = Vec::new();
    let mut failed = 0usize;

    let renderer = report::create_renderer(config.format);
    let report_path = config.report_path();
    let report_result = renderer.render(&input).and_then(|contents| {
        report::write_output(&report_path, &contents, "report")?;
        Ok(())
    });
    match report_result {
        Ok(()) => {
            tracing::info!(output = %report_path.display(), format = renderer.name(), "Report generated");
            written.push(report_path);
        }
        Err(e) => {
            tracing::error!(output = %report_path.display(), error = %e, "Failed to generate report");
            failed += 1;
        }
    }

    if emit_catalogue {
        let catalogue_path = config.catalogue_path();
        let contents = report::render_catalogue(&aggregates.catalogue, &input.generated_at);
        match report::write_output(&catalogue_path, &contents, "catalogue") {
            Ok(()) => {
                tracing::info!(
                    output = %catalogue_path.display(),
                    entries = aggregates.catalogue.len(),
                    "Catalogue generated"
                );
                written.push(catalogue_path);
            }
            Err(e) => {
                tracing::error!(output = %catalogue_path.display(), error = %e, "Failed to generate catalogue");
                failed += 1;
            }
        }
    }

    if !cli.quiet {
        report::write_pretty(&cli.root, config.mode, &outcome, &aggregates, &written);
    }

    if written.is_empty() && failed > 0 {
        return Ok(EXIT_ERROR);
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "throwscan",
            "projects",
            "--mode",
            "inclusive",
            "--catalogue",
            "--format",
            "json",
            "--file-key",
            "relative-path",
            "--no-parallel",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(cli.root, PathBuf::from("projects"));
        assert_eq!(config.mode, ThrowPolicy::Inclusive);
        assert!(config.emit_catalogue());
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.file_key, FileKey::RelativePath);
        assert!(!config.parallel);
    }

    #[test]
    fn test_catalogue_flags_conflict() {
        let result = Cli::try_parse_from(["throwscan", "p", "--catalogue", "--no-catalogue"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_root_is_required() {
        assert!(Cli::try_parse_from(["throwscan"]).is_err());
        assert!(Cli::try_parse_from(["throwscan", "a", "b"]).is_err());
    }

    #[test]
    fn test_no_catalogue_overrides_strict_default() {
        let cli = Cli::try_parse_from(["throwscan", "p", "--no-catalogue"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(!config.emit_catalogue());
    }
}
