//! Record and aggregate structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exception type recorded for throw sites that do not construct a new object.
pub const UNKNOWN_EXCEPTION_TYPE: &str = "Unknown";

/// Rendering used for a construction without arguments.
pub const EMPTY_ARGUMENTS: &str = "()";

/// One observed throw site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    /// Top-level project directory name.
    pub project_name: String,
    /// File the throw lives in (base name, or project-relative path when so configured).
    pub file_name: String,
    /// Simple name of the constructed class, or [`UNKNOWN_EXCEPTION_TYPE`].
    pub exception_type: String,
    /// `(arg1, arg2)` for constructions, the thrown expression's source otherwise.
    pub exception_text: String,
    /// 1-indexed line of the throw statement, 0 when unknown.
    pub line_number: usize,
}

impl ExceptionRecord {
    /// Whether the record came from a rethrow rather than a construction.
    pub fn is_rethrow(&self) -> bool {
        self.exception_type == UNKNOWN_EXCEPTION_TYPE
    }
}

impl fmt::Display for ExceptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{} ", self.project_name, self.file_name, self.line_number)?;
        if self.is_rethrow() {
            write!(f, "throw {}", self.exception_text)
        } else {
            write!(f, "new {}{}", self.exception_type, self.exception_text)
        }
    }
}

/// Number of records sharing a `(project, file)` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_name: String,
    pub file_name: String,
    pub exception_count: usize,
}

/// Number of records under one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTotal {
    pub project_name: String,
    pub total_exceptions: usize,
}

/// Render constructor arguments as `(a, b, c)`, or `()` when there are none.
pub fn render_arguments<S: AsRef<str>>(arguments: &[S]) -> String {
    if arguments.is_empty() {
        return EMPTY_ARGUMENTS.to_string();
    }
    let joined: Vec<&str> = arguments.iter().map(|a| a.as_ref()).collect();
    format!("({})", joined.join(", "))
}
