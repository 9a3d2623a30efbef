//! Core traits for language analysis.

use std::path::{Path, PathBuf};

use super::ThrowSite;
use crate::error::Result;

/// Holds a parsed tree-sitter tree and associated metadata.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path (for error reporting).
    pub path: PathBuf,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether the tree contains ERROR or MISSING nodes.
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Line (1-indexed) of the first ERROR or MISSING node, if any.
    pub fn first_error_line(&self) -> Option<usize> {
        let root = self.tree.root_node();
        if !root.has_error() {
            return None;
        }

        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                return Some(node.start_position().row + 1);
            }
            // Only descend into subtrees that contain the error.
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return None;
                }
            }
        }
    }
}

/// Language-specific analyzer trait.
///
/// # Thread Safety
///
/// Note: tree_sitter::Parser is not Sync, so implementations should
/// create parsers as needed.
pub trait LanguageAnalyzer: Send + Sync {
    /// Returns the language identifier (e.g., "java").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a source file into a tree-sitter tree.
    ///
    /// A tree containing syntax errors counts as a failed parse: the file
    /// is rejected as a whole instead of being analysed partially.
    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile>;

    /// Every throw statement in the tree, at any nesting depth, in source order.
    fn find_throw_sites(&self, parsed: &ParsedFile) -> Vec<ThrowSite>;

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
