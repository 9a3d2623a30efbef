//! Turns throw sites into exception records.
//!
//! The language analyzer finds every throw statement; the visitor decides,
//! per [`ThrowPolicy`], which of them become records and what they say.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{LanguageAnalyzer, ParsedFile, ThrowSite, ThrownExpr};
use crate::aggregate::{render_arguments, ExceptionRecord, UNKNOWN_EXCEPTION_TYPE};

/// What to do with throw statements that do not construct a new exception.
///
/// Constructions (`throw new X(...)`) are recorded under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThrowPolicy {
    /// Record construction sites only; `throw e;` and friends are skipped.
    #[default]
    Strict,
    /// Record every throw site. Non-constructions get the `Unknown` type
    /// and the thrown expression's source text.
    Inclusive,
}

impl ThrowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThrowPolicy::Strict => "strict",
            ThrowPolicy::Inclusive => "inclusive",
        }
    }
}

impl fmt::Display for ThrowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record builder for the throw sites of one file.
#[derive(Debug, Clone)]
pub struct ThrowVisitor<'a> {
    project_name: &'a str,
    file_name: &'a str,
    policy: ThrowPolicy,
}

impl<'a> ThrowVisitor<'a> {
    pub fn new(project_name: &'a str, file_name: &'a str, policy: ThrowPolicy) -> Self {
        Self {
            project_name,
            file_name,
            policy,
        }
    }

    /// Append a record for every qualifying throw site in `parsed` to `out`.
    /// Returns the number of records appended.
    pub fn visit(
        &self,
        analyzer: &dyn LanguageAnalyzer,
        parsed: &ParsedFile,
        out: &mut Vec<ExceptionRecord>,
    ) -> usize {
        let before = out.len();
        let sites = analyzer.find_throw_sites(parsed);
        out.extend(sites.iter().filter_map(|site| self.record_for(site)));
        let recorded = out.len() - before;

        tracing::debug!(
            file = %parsed.path.display(),
            sites = sites.len(),
            recorded,
            "Visited file"
        );
        recorded
    }

    /// Classify a single throw site. `None` means the site is not recorded.
    pub fn record_for(&self, site: &ThrowSite) -> Option<ExceptionRecord> {
        let (exception_type, exception_text) = match (&site.thrown, self.policy) {
            (
                ThrownExpr::Construction {
                    type_name,
                    arguments,
                },
                _,
            ) => (type_name.clone(), render_arguments(arguments)),
            (ThrownExpr::Existing { .. }, ThrowPolicy::Strict) => return None,
            (ThrownExpr::Existing { text }, ThrowPolicy::Inclusive) => {
                (UNKNOWN_EXCEPTION_TYPE.to_string(), text.clone())
            }
        };

        Some(ExceptionRecord {
            project_name: self.project_name.to_string(),
            file_name: self.file_name.to_string(),
            exception_type,
            exception_text,
            line_number: site.line(),
        })
    }
}
