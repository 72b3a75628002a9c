use anyhow::{Context, Result};

use enex2text_lib::export::{preview_directory, process_directory};

use crate::app::App;
use crate::commands::convert::print_report;

/// Directory mode. Returns false when any file or note failed.
pub fn run(app: &App) -> Result<bool> {
    let input_dir = &app.config.input_dir;
    let report = if app.dry_run {
        preview_directory(&app.config)
    } else {
        process_directory(&app.config)
    }
    .with_context(|| format!("Failed to read input directory {}", input_dir.display()))?;

    for file_report in &report.converted {
        print_report(file_report, app.dry_run);
    }
    for (path, error) in &report.failed {
        eprintln!("Error: {}: {}", path.display(), error);
    }

    if !report.converted.is_empty() || !report.failed.is_empty() {
        println!(
            "{} file(s), {} note(s) written, {} skipped, {} file error(s)",
            report.converted.len(),
            report.notes_written(),
            report.notes_skipped(),
            report.failed.len()
        );
    }

    Ok(!report.has_failures())
}
