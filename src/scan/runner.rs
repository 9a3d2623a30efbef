//! Top-level scan over every project under a root directory.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use super::{FailedProject, ProjectScan, ProjectScanner, ScanOptions, ScanOutcome};
use crate::error::{Result, ScanError};

/// A project directory directly under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
}

/// Scans every project under a root and merges their records.
pub struct Runner {
    options: ScanOptions,
}

impl Runner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scan all projects under `root`.
    ///
    /// Only a failure to list `root` itself is an error; failures inside a
    /// project are recorded in the outcome and the run continues.
    pub fn run(&self, root: &Path) -> Result<ScanOutcome> {
        let projects = list_projects(root, self.options.skip_hidden_projects)?;
        tracing::info!(root = %root.display(), projects = projects.len(), "Found projects");

        let results: Vec<(Project, Result<ProjectScan>)> = if self.options.parallel {
            projects
                .into_par_iter()
                .map(|p| {
                    let result = self.scan_project(&p);
                    (p, result)
                })
                .collect()
        } else {
            projects
                .into_iter()
                .map(|p| {
                    let result = self.scan_project(&p);
                    (p, result)
                })
                .collect()
        };

        let mut outcome = ScanOutcome::default();
        for (project, result) in results {
            outcome.stats.projects_scanned += 1;
            match result {
                Ok(scan) => {
                    outcome.stats.files_scanned += scan.files_scanned;
                    outcome.stats.files_skipped += scan.skipped.len();
                    outcome.records.extend(scan.records);
                    outcome.skipped_files.extend(scan.skipped);
                }
                Err(e) => {
                    tracing::warn!(project = %project.name, error = %e, "Skipping project");
                    outcome.stats.projects_failed += 1;
                    outcome.failed_projects.push(FailedProject {
                        name: project.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    fn scan_project(&self, project: &Project) -> Result<ProjectScan> {
        tracing::info!(project = %project.name, "Analyzing project");
        ProjectScanner::new(&self.options).scan(&project.path, &project.name)
    }
}

/// Immediate subdirectories of `root`, sorted by name.
///
/// Directories starting with a dot are projects too unless `skip_hidden` is set.
pub fn list_projects(root: &Path, skip_hidden: bool) -> Result<Vec<Project>> {
    let read_err = |source: std::io::Error| ScanError::Read {
        path: root.to_path_buf(),
        source,
    };

    let mut projects = Vec::new();
    for entry in fs::read_dir(root).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if skip_hidden && name.starts_with('.') {
            tracing::debug!(dir = %path.display(), "Skipping hidden directory");
            continue;
        }
        projects.push(Project { name, path });
    }

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_list_projects() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("zeta")).unwrap();
        fs::create_dir_all(temp.path().join("alpha")).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join("README.md"), "hi").unwrap();

        let names = |skip_hidden| -> Vec<String> {
            list_projects(temp.path(), skip_hidden)
                .unwrap()
                .into_iter()
                .map(|p| p.name)
                .collect()
        };
        assert_eq!(names(false), vec![".git", "alpha", "zeta"]);
        assert_eq!(names(true), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_list_projects_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = list_projects(&temp.path().join("nope"), false).unwrap_err();
        assert!(matches!(err, ScanError::Read { .. }));
    }

    #[test]
    fn test_run_merges_projects() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "alpha/src/A.java",
            "class A { void a() { throw new IllegalStateException(); } }",
        );
        write(
            temp.path(),
            "beta/src/B.java",
            "class B { void b() { throw new IllegalArgumentException(\"b\"); }\n void c(RuntimeException e) { throw e; } }",
        );
        fs::create_dir_all(temp.path().join("empty")).unwrap();
        // Files directly under the root are not part of any project.
        write(temp.path(), "Loose.java", "class Loose { void a() { throw new Error(); } }");

        let config = Config::default();
        let outcome = Runner::new(config.scan_options().unwrap())
            .run(temp.path())
            .unwrap();

        assert_eq!(outcome.stats.projects_scanned, 3);
        assert_eq!(outcome.stats.files_scanned, 2);
        assert_eq!(outcome.stats.projects_failed, 0);
        assert_eq!(outcome.records.len(), 2);
        let projects: Vec<&str> = outcome.records.iter().map(|r| r.project_name.as_str()).collect();
        assert_eq!(projects, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_hidden_directory_is_a_project_by_default() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            ".legacy-svc/src/Old.java",
            "class Old { void a() { throw new IllegalStateException(\"old\"); } }",
        );

        let outcome = Runner::new(Config::default().scan_options().unwrap())
            .run(temp.path())
            .unwrap();
        assert_eq!(outcome.stats.projects_scanned, 1);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].project_name, ".legacy-svc");

        let config = Config {
            skip_hidden_projects: true,
            ..Default::default()
        };
        let outcome = Runner::new(config.scan_options().unwrap())
            .run(temp.path())
            .unwrap();
        assert_eq!(outcome.stats.projects_scanned, 0);
        assert!(outcome.records.is_empty());
    }
}
