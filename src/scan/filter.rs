//! File eligibility rules.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Component, Path};

use crate::error::{Result, ScanError};

/// Decides which files under a project are scanned.
///
/// Directory exclusion is a whole-segment match: with `test` excluded,
/// `src/test/Foo.java` is skipped while `testing-utils/Foo.java` and
/// `latest/Foo.java` are kept.
#[derive(Debug, Clone)]
pub struct PathFilter {
    excluded_dirs: Vec<String>,
    excluded_globs: Option<GlobSet>,
    extensions: Vec<String>,
}

impl PathFilter {
    pub fn new(
        excluded_dirs: Vec<String>,
        excluded_paths: &[String],
        extensions: Vec<String>,
    ) -> Result<Self> {
        let excluded_globs = if excluded_paths.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in excluded_paths {
                let glob = Glob::new(pattern).map_err(|e| {
                    ScanError::Config(format!("invalid exclude pattern {:?}: {}", pattern, e))
                })?;
                builder.add(glob);
            }
            let set = builder
                .build()
                .map_err(|e| ScanError::Config(format!("invalid exclude patterns: {}", e)))?;
            Some(set)
        };

        Ok(Self {
            excluded_dirs,
            excluded_globs,
            extensions,
        })
    }

    /// Whether a directory with this name is pruned from the walk.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Whether the file has a recognised source extension.
    pub fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|x| x == ext))
            .unwrap_or(false)
    }

    /// Whether a file, given by its path relative to the project directory, is scanned.
    pub fn accepts(&self, relative: &Path) -> bool {
        if !self.has_source_extension(relative) {
            return false;
        }

        let in_excluded_dir = relative
            .parent()
            .map(|dir| {
                dir.components().any(|c| match c {
                    Component::Normal(name) => name
                        .to_str()
                        .map(|n| self.is_excluded_dir(n))
                        .unwrap_or(false),
                    _ => false,
                })
            })
            .unwrap_or(false);
        if in_excluded_dir {
            return false;
        }

        if let Some(globs) = &self.excluded_globs {
            let normalized = relative.to_string_lossy().replace('\\', "/");
            if globs.is_match(normalized.as_str()) {
                return false;
            }
        }

        true
    }
}
