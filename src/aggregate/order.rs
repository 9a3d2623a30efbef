//! Ordering and deduplication rules shared by every aggregate.
//!
//! All sorting in the crate goes through these comparators so the record
//! table, the summaries and the totals can never disagree on order.

use indexmap::IndexSet;
use std::cmp::Ordering;

use super::record::{ExceptionRecord, ProjectSummary, ProjectTotal};

/// Records: project, then file, then line number (numeric).
///
/// Use with a stable sort so that records sharing all three keys keep
/// their discovery order.
pub fn compare_records(a: &ExceptionRecord, b: &ExceptionRecord) -> Ordering {
    a.project_name
        .cmp(&b.project_name)
        .then_with(|| a.file_name.cmp(&b.file_name))
        .then_with(|| a.line_number.cmp(&b.line_number))
}

/// Summaries: project, then file.
pub fn compare_summaries(a: &ProjectSummary, b: &ProjectSummary) -> Ordering {
    a.project_name
        .cmp(&b.project_name)
        .then_with(|| a.file_name.cmp(&b.file_name))
}

/// Totals: project.
pub fn compare_totals(a: &ProjectTotal, b: &ProjectTotal) -> Ordering {
    a.project_name.cmp(&b.project_name)
}

/// Sort records in place (stable).
pub fn sort_records(records: &mut [ExceptionRecord]) {
    records.sort_by(compare_records);
}

/// Insertion-ordered set of non-blank exception texts.
#[derive(Debug, Default, Clone)]
pub struct UniqueTexts {
    texts: IndexSet<String>,
}

impl UniqueTexts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text. Blank texts and exact duplicates are ignored.
    /// Returns true if the text was new.
    pub fn insert(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || self.texts.contains(text) {
            return false;
        }
        self.texts.insert(text.to_string())
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Texts sorted lexically ascending.
    pub fn into_sorted(self) -> Vec<String> {
        let mut texts: Vec<String> = self.texts.into_iter().collect();
        texts.sort();
        texts
    }
}

impl<'a> FromIterator<&'a str> for UniqueTexts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = UniqueTexts::new();
        for text in iter {
            set.insert(text);
        }
        set
    }
}
