//! Run configuration.
//!
//! Settings come from an optional YAML file and are overridden by CLI flags.
//!
//! ```yaml
//! mode: inclusive          # strict (default) | inclusive
//! catalogue: true          # default: on in strict mode, off in inclusive mode
//! excluded_dirs: [target, test, generated]
//! excluded_paths: ["**/legacy/**"]
//! file_key: relative-path  # file-name (default) | relative-path
//! format: html             # html (default) | json | text
//! output_dir: reports
//! skip_hidden_projects: true  # default: every subdirectory is a project
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{get_analyzer, ThrowPolicy};
use crate::error::{Result, ScanError};
use crate::report::ReportFormat;
use crate::scan::{FileKey, PathFilter, ScanOptions};

/// Config file names looked up in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["throwscan.yaml", ".throwscan.yaml"];

/// Report file name without extension.
pub const DEFAULT_REPORT_STEM: &str = "exception_analysis_report";

pub const DEFAULT_CATALOGUE_FILE: &str = "unique_exception_texts.txt";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How throws of existing values are handled.
    pub mode: ThrowPolicy,
    /// Whether to write the unique-text catalogue. `None` follows the mode.
    pub catalogue: Option<bool>,
    /// Directory names that exclude every file beneath them.
    pub excluded_dirs: Vec<String>,
    /// Glob patterns matched against project-relative paths.
    pub excluded_paths: Vec<String>,
    /// Source file extensions to scan (without dot).
    pub extensions: Vec<String>,
    /// How records identify their file.
    pub file_key: FileKey,
    /// Scan projects and files on the rayon thread pool.
    pub parallel: bool,
    /// Leave out hidden directories under the root instead of scanning them as projects.
    pub skip_hidden_projects: bool,
    /// Report renderer.
    pub format: ReportFormat,
    /// Directory the output files are written to.
    pub output_dir: PathBuf,
    /// Report file name. Defaults to `exception_analysis_report.<ext>`.
    pub report_file: Option<String>,
    pub catalogue_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ThrowPolicy::default(),
            catalogue: None,
            excluded_dirs: vec!["target".to_string(), "test".to_string()],
            excluded_paths: Vec::new(),
            extensions: vec!["java".to_string()],
            file_key: FileKey::default(),
            parallel: true,
            skip_hidden_projects: false,
            format: ReportFormat::default(),
            output_dir: PathBuf::from("."),
            report_file: None,
            catalogue_file: DEFAULT_CATALOGUE_FILE.to_string(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content)
            .map_err(|e| ScanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a config from YAML text. An empty document yields the defaults.
    pub fn parse_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Find a config file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }

    /// Whether the catalogue is written: explicit setting, else strict mode only.
    pub fn emit_catalogue(&self) -> bool {
        self.catalogue.unwrap_or(self.mode == ThrowPolicy::Strict)
    }

    pub fn report_path(&self) -> PathBuf {
        let name = match &self.report_file {
            Some(name) => name.clone(),
            None => format!("{}.{}", DEFAULT_REPORT_STEM, self.format.extension()),
        };
        self.output_dir.join(name)
    }

    pub fn catalogue_path(&self) -> PathBuf {
        self.output_dir.join(&self.catalogue_file)
    }

    /// Check the configuration before any scanning starts.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(ScanError::Config("extensions must not be empty".to_string()));
        }
        for ext in &self.extensions {
            let ext = ext.trim_start_matches('.');
            if get_analyzer(ext).is_none() {
                return Err(ScanError::Config(format!(
                    "no analyzer for extension {:?}",
                    ext
                )));
            }
        }
        if self.excluded_dirs.iter().any(|d| d.is_empty() || d.contains(['/', '\\'])) {
            return Err(ScanError::Config(
                "excluded_dirs entries must be single directory names".to_string(),
            ));
        }
        if matches!(&self.report_file, Some(name) if name.trim().is_empty()) {
            return Err(ScanError::Config("report_file must not be empty".to_string()));
        }
        if self.emit_catalogue() && self.catalogue_file.trim().is_empty() {
            return Err(ScanError::Config("catalogue_file must not be empty".to_string()));
        }
        self.path_filter()?;
        Ok(())
    }

    /// Build the file eligibility filter.
    pub fn path_filter(&self) -> Result<PathFilter> {
        let extensions = self
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        PathFilter::new(self.excluded_dirs.clone(), &self.excluded_paths, extensions)
    }

    /// Options for the scanner.
    pub fn scan_options(&self) -> Result<ScanOptions> {
        Ok(ScanOptions {
            policy: self.mode,
            file_key: self.file_key,
            parallel: self.parallel,
            skip_hidden_projects: self.skip_hidden_projects,
            filter: self.path_filter()?,
        })
    }
}
