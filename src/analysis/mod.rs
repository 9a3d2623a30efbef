//! AST-backed throw-site analysis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Source File     │────▶│ Analyzer     │────▶│ ThrowSites    │
//! └─────────────────┘     │ (Java)       │     │ (type, args,  │
//!                         └──────────────┘     │  operand text)│
//!                                              └───────────────┘
//!                                                      │
//!                                                      ▼
//!                         ┌──────────────┐     ┌───────────────┐
//!                         │ Exception    │◀────│ ThrowVisitor  │
//!                         │ Records      │     │ (ThrowPolicy) │
//!                         └──────────────┘     └───────────────┘
//! ```
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/analysis/languages/`
//! 2. Implement `LanguageAnalyzer` (parse + `find_throw_sites`)
//! 3. Register the analyzer in `languages/mod.rs`

mod facts;
mod languages;
mod traits;
mod visitor;

pub use facts::{Span, ThrowSite, ThrownExpr};
pub use languages::{get_analyzer, register_analyzers, registered_extensions, JavaAnalyzer};
pub use traits::{LanguageAnalyzer, ParsedFile};
pub use visitor::{ThrowPolicy, ThrowVisitor};
