//! throwscan - exception throw-site inventory for Java codebases.
//!
//! throwscan walks a directory of independent projects, finds every `throw`
//! statement in their Java sources, and aggregates the results per file,
//! per project and globally. It writes a self-contained HTML report and a
//! catalogue of the distinct exception texts it saw.
//!
//! # Architecture
//!
//! - `analysis`: tree-sitter parsing and throw-site classification
//! - `scan`: project discovery, file filtering, per-file fault isolation
//! - `aggregate`: records, summaries, totals, ordering and dedup
//! - `report`: HTML, JSON and text renderers, catalogue, console summary
//! - `config`: YAML configuration with CLI overrides
//!
//! # Example
//!
//! ```no_run
//! use throwscan::{Config, Runner};
//!
//! let config = Config::default();
//! let outcome = Runner::new(config.scan_options()?).run("projects".as_ref())?;
//! let aggregates = outcome.aggregate();
//! println!("{} exceptions", aggregates.total_exceptions());
//! # Ok::<(), throwscan::ScanError>(())
//! ```

pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod scan;

pub use aggregate::{Aggregates, ExceptionRecord, ProjectSummary, ProjectTotal};
pub use analysis::{register_analyzers, JavaAnalyzer, LanguageAnalyzer, ThrowPolicy, ThrowVisitor};
pub use config::Config;
pub use error::{Result, ScanError};
pub use report::{create_renderer, ReportFormat, ReportInput, Renderer};
pub use scan::{FileKey, Runner, ScanOptions, ScanOutcome, ScanStats};
