//! Throw-site facts extracted from a syntax tree.

use std::fmt;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// The operand of a throw statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrownExpr {
    /// `throw new Type(args...)`.
    Construction {
        /// Simple class name, without package, outer class or type arguments.
        type_name: String,
        /// Source text of each argument, in order.
        arguments: Vec<String>,
    },
    /// Anything else: a variable, a method call result, a field, ...
    Existing {
        /// Source text of the thrown expression.
        text: String,
    },
}

impl ThrownExpr {
    pub fn is_construction(&self) -> bool {
        matches!(self, ThrownExpr::Construction { .. })
    }
}

/// One throw statement found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowSite {
    /// Span of the whole throw statement. `None` when the node carries no position.
    pub span: Option<Span>,
    pub thrown: ThrownExpr,
}

impl ThrowSite {
    /// 1-indexed line of the statement, 0 when unknown.
    pub fn line(&self) -> usize {
        self.span.as_ref().map(|s| s.start_line).unwrap_or(0)
    }
}
