//! Colored terminal summary printed after a run.

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::aggregate::Aggregates;
use crate::analysis::ThrowPolicy;
use crate::scan::ScanOutcome;

/// Print a human-readable summary of the run to stdout.
pub fn write_pretty(
    root: &Path,
    policy: ThrowPolicy,
    outcome: &ScanOutcome,
    aggregates: &Aggregates,
    outputs: &[PathBuf],
) {
    println!();
    print!("  ");
    print!("{}", "throwscan".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", root.display());
    print!("  {}", "Mode:     ".dimmed());
    println!("{}", policy);
    println!();

    write_counts(outcome, aggregates);
    println!();

    if !aggregates.totals.is_empty() {
        write_totals(aggregates);
        println!();
    }

    if !outcome.skipped_files.is_empty() || !outcome.failed_projects.is_empty() {
        write_problems(outcome);
        println!();
    }

    write_outputs(outputs);
    println!();
}

fn write_counts(outcome: &ScanOutcome, aggregates: &Aggregates) {
    let stats = &outcome.stats;
    print!("  Projects: {}", stats.projects_scanned.to_string().bold());
    print!("  Files: {}", stats.files_scanned.to_string().bold());
    print!(
        "  Exceptions: {}",
        aggregates.total_exceptions().to_string().bold()
    );
    print!("  Unique texts: {}", aggregates.catalogue.len());
    if stats.files_skipped > 0 {
        print!(
            "  {}",
            format!("({} skipped)", stats.files_skipped).yellow()
        );
    }
    println!();
}

fn write_totals(aggregates: &Aggregates) {
    println!("  {}", "Project totals".bold());
    let width = aggregates
        .totals
        .iter()
        .map(|t| t.project_name.chars().count())
        .max()
        .unwrap_or(0);
    for total in &aggregates.totals {
        println!(
            "    {:<width$}  {}",
            total.project_name,
            total.total_exceptions.to_string().cyan(),
            width = width
        );
    }
}

fn write_problems(outcome: &ScanOutcome) {
    if !outcome.failed_projects.is_empty() {
        println!("  {}", "Failed projects".red().bold());
        for failed in &outcome.failed_projects {
            println!("    {}  {}", failed.name.red(), failed.reason.dimmed());
        }
    }
    if !outcome.skipped_files.is_empty() {
        println!("  {}", "Skipped files".yellow().bold());
        for skipped in &outcome.skipped_files {
            println!(
                "    {}  {}",
                skipped.path.display().to_string().yellow(),
                skipped.reason.dimmed()
            );
        }
    }
}

fn write_outputs(outputs: &[PathBuf]) {
    if outputs.is_empty() {
        println!("  {}", "✗ No output written".red());
        return;
    }
    for path in outputs {
        print!("  {}", "✓ Wrote ".green());
        println!("{}", path.display());
    }
}
