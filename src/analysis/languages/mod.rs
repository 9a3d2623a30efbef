//! Language-specific analyzer implementations.

mod java;

pub use java::JavaAnalyzer;

use super::LanguageAnalyzer;
use once_cell::sync::OnceCell;

/// Static storage for Java analyzer.
static JAVA_ANALYZER: OnceCell<JavaAnalyzer> = OnceCell::new();

/// Register all available language analyzers.
///
/// Idempotent; `get_analyzer` calls it on demand.
pub fn register_analyzers() {
    JAVA_ANALYZER.get_or_init(JavaAnalyzer::new);
}

/// Get an analyzer for the given file extension (without dot).
///
/// Returns None if no analyzer is registered for the extension.
pub fn get_analyzer(ext: &str) -> Option<&'static dyn LanguageAnalyzer> {
    register_analyzers();

    match ext {
        "java" => JAVA_ANALYZER.get().map(|a| a as &'static dyn LanguageAnalyzer),
        _ => None,
    }
}

/// Get all registered file extensions.
pub fn registered_extensions() -> Vec<&'static str> {
    register_analyzers();

    let mut exts = Vec::new();
    if let Some(a) = JAVA_ANALYZER.get() {
        exts.extend_from_slice(a.file_extensions());
    }
    exts
}
