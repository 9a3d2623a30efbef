//! Scanning of a single project directory.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FileKey, ScanOptions, SkippedFile};
use crate::aggregate::ExceptionRecord;
use crate::analysis::{get_analyzer, ThrowVisitor};
use crate::error::{Result, ScanError};

/// Everything one project contributed.
#[derive(Debug, Clone, Default)]
pub struct ProjectScan {
    pub project_name: String,
    pub records: Vec<ExceptionRecord>,
    /// Eligible files that were analysed successfully.
    pub files_scanned: usize,
    /// Eligible files that could not be read or parsed.
    pub skipped: Vec<SkippedFile>,
}

/// Runs the throw visitor over every eligible file of a project.
pub struct ProjectScanner<'a> {
    options: &'a ScanOptions,
}

impl<'a> ProjectScanner<'a> {
    pub fn new(options: &'a ScanOptions) -> Self {
        Self { options }
    }

    /// Scan a project directory.
    ///
    /// Files that fail to read or parse are logged and listed in
    /// [`ProjectScan::skipped`]. A failing directory walk fails the whole
    /// project, so it contributes no records at all.
    pub fn scan(&self, project_dir: &Path, project_name: &str) -> Result<ProjectScan> {
        let files = self.collect_files(project_dir, project_name)?;
        tracing::debug!(project = %project_name, files = files.len(), "Collected source files");

        let results: Vec<(PathBuf, Result<Vec<ExceptionRecord>>)> = if self.options.parallel {
            files
                .into_par_iter()
                .map(|path| {
                    let result = self.analyze_file(project_dir, &path, project_name);
                    (path, result)
                })
                .collect()
        } else {
            files
                .into_iter()
                .map(|path| {
                    let result = self.analyze_file(project_dir, &path, project_name);
                    (path, result)
                })
                .collect()
        };

        let mut scan = ProjectScan {
            project_name: project_name.to_string(),
            ..Default::default()
        };
        for (path, result) in results {
            match result {
                Ok(records) => {
                    scan.files_scanned += 1;
                    scan.records.extend(records);
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "Skipping file");
                    scan.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(scan)
    }

    /// Eligible source files under the project, sorted by path.
    fn collect_files(&self, project_dir: &Path, project_name: &str) -> Result<Vec<PathBuf>> {
        let filter = &self.options.filter;
        let mut files = Vec::new();

        let walker = WalkDir::new(project_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // Prune excluded directories, never the project root itself.
                if e.depth() > 0 && e.file_type().is_dir() {
                    let name = e.file_name().to_string_lossy();
                    return !filter.is_excluded_dir(&name);
                }
                true
            });

        for entry in walker {
            let entry = entry.map_err(|source| ScanError::Walk {
                project: project_name.to_string(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(project_dir).unwrap_or(path);
            if filter.accepts(relative) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Read, parse and visit one file.
    fn analyze_file(
        &self,
        project_dir: &Path,
        path: &Path,
        project_name: &str,
    ) -> Result<Vec<ExceptionRecord>> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let analyzer =
            get_analyzer(ext).ok_or_else(|| ScanError::UnsupportedExtension(ext.to_string()))?;

        let source = fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = analyzer.parse(path, source.as_bytes())?;

        let file_name = file_key(self.options.file_key, project_dir, path);
        let mut records = Vec::new();
        ThrowVisitor::new(project_name, &file_name, self.options.policy)
            .visit(analyzer, &parsed, &mut records);

        for record in &records {
            tracing::trace!(%record, "Throw site");
        }
        Ok(records)
    }
}

/// The string a record uses to identify its file.
fn file_key(key: FileKey, project_dir: &Path, path: &Path) -> String {
    match key {
        FileKey::FileName => path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string()),
        FileKey::RelativePath => path
            .strip_prefix(project_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ThrowPolicy;
    use crate::config::Config;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn options(parallel: bool, file_key: FileKey) -> ScanOptions {
        let config = Config {
            parallel,
            file_key,
            mode: ThrowPolicy::Inclusive,
            ..Default::default()
        };
        config.scan_options().unwrap()
    }

    #[test]
    fn test_file_key() {
        let dir = Path::new("/work/alpha");
        let path = Path::new("/work/alpha/src/main/Foo.java");
        assert_eq!(file_key(FileKey::FileName, dir, path), "Foo.java");
        assert_eq!(file_key(FileKey::RelativePath, dir, path), "src/main/Foo.java");
    }

    #[test]
    fn test_scan_skips_excluded_and_broken_files() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("alpha");
        write(
            &project,
            "src/main/java/Ok.java",
            "class Ok { void a() { throw new IllegalStateException(\"x\"); } }",
        );
        write(
            &project,
            "src/test/java/OkTest.java",
            "class OkTest { void a() { throw new AssertionError(); } }",
        );
        write(
            &project,
            "target/Generated.java",
            "class Generated { void a() { throw new Error(); } }",
        );
        write(&project, "src/main/java/Broken.java", "class Broken { void a( }");
        write(&project, "src/main/java/notes.txt", "throw new Nope();");

        for parallel in [false, true] {
            let opts = options(parallel, FileKey::FileName);
            let scan = ProjectScanner::new(&opts).scan(&project, "alpha").unwrap();
            assert_eq!(scan.project_name, "alpha");
            assert_eq!(scan.files_scanned, 1);
            assert_eq!(scan.records.len(), 1);
            assert_eq!(scan.records[0].file_name, "Ok.java");
            assert_eq!(scan.skipped.len(), 1);
            assert!(scan.skipped[0].path.ends_with("Broken.java"));
        }
    }

    #[test]
    fn test_relative_path_key_separates_same_named_files() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("beta");
        let body = "class Util { void a() { throw new RuntimeException(); } }";
        write(&project, "a/Util.java", body);
        write(&project, "b/Util.java", body);

        let opts = options(false, FileKey::RelativePath);
        let scan = ProjectScanner::new(&opts).scan(&project, "beta").unwrap();
        let names: Vec<&str> = scan.records.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["a/Util.java", "b/Util.java"]);

        let opts = options(false, FileKey::FileName);
        let scan = ProjectScanner::new(&opts).scan(&project, "beta").unwrap();
        assert!(scan.records.iter().all(|r| r.file_name == "Util.java"));
    }

    #[test]
    fn test_missing_directory_fails_project() {
        let temp = TempDir::new().unwrap();
        let opts = options(false, FileKey::FileName);
        let err = ProjectScanner::new(&opts)
            .scan(&temp.path().join("gone"), "gone")
            .unwrap_err();
        assert!(matches!(err, ScanError::Walk { .. }));
    }

    #[test]
    fn test_non_utf8_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("gamma");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("Latin1.java"), b"class A { String s = \"\xe9\"; }").unwrap();

        let opts = options(false, FileKey::FileName);
        let scan = ProjectScanner::new(&opts).scan(&project, "gamma").unwrap();
        assert_eq!(scan.files_scanned, 0);
        assert_eq!(scan.skipped.len(), 1);
        assert!(scan.skipped[0].reason.contains("cannot read"));
    }
}
