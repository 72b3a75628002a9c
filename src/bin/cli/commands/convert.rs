use std::path::Path;

use anyhow::{Context, Result};

use enex2text_lib::export::{convert_file, preview_file, FileReport};

use crate::app::App;

/// Single-file mode. Returns false when any note was skipped.
pub fn run(app: &App, path: &Path) -> Result<bool> {
    let report = if app.dry_run {
        preview_file(path, &app.config)
    } else {
        convert_file(path, &app.config)
    }
    .with_context(|| format!("Failed to convert {}", path.display()))?;

    print_report(&report, app.dry_run);
    Ok(report.is_clean())
}

/// Print the per-note outcome of one file
pub fn print_report(report: &FileReport, dry_run: bool) {
    let verb = if dry_run { "would write" } else { "wrote" };
    println!("{}:", report.source.display());

    for output in &report.outputs {
        println!("  {} {}", verb, output.display());
    }
    for failure in &report.failures {
        eprintln!("  skipped {}", failure);
    }
    if let Some(target) = &report.archived_to {
        println!("  archived to {}", target.display());
    }
}
