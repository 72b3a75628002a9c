//! Directory batch processing
//!
//! Runs in two phases: every `.enex` file directly inside the input directory
//! is converted, then each file that converted without a single failure is
//! moved into the archive directory. Failed files stay where they are so they
//! can be fixed and retried.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::converter::{convert_file, preview_file, FileReport};
use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};

/// Outcome of a directory run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files that parsed, in processing order
    pub converted: Vec<FileReport>,
    /// Files that could not be converted or archived
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    pub fn notes_written(&self) -> usize {
        self.converted.iter().map(|r| r.outputs.len()).sum()
    }

    pub fn notes_skipped(&self) -> usize {
        self.converted.iter().map(|r| r.failures.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty() || self.converted.iter().any(|r| !r.is_clean())
    }
}

/// List input files directly inside `config.input_dir`, sorted by name.
///
/// Subdirectories and files without the input suffix are skipped.
pub fn list_input_files(config: &ConverterConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(&config.input_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| config.is_input_file_name(n))
            .unwrap_or(false);

        if path.is_file() && matches {
            files.push(path);
        } else {
            log::debug!("Ignoring {:?}", path);
        }
    }

    files.sort();
    Ok(files)
}

/// Convert all input files, then archive the ones that converted cleanly.
///
/// Only a failure to list the input directory aborts the run; everything else
/// is recorded per file in the report.
pub fn process_directory(config: &ConverterConfig) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for path in list_input_files(config)? {
        match convert_file(&path, config) {
            Ok(file_report) => report.converted.push(file_report),
            Err(e) => {
                log::warn!("Failed to convert {:?}: {}", path, e);
                report.failed.push((path, e));
            }
        }
    }

    for file_report in report.converted.iter_mut().filter(|r| r.is_clean()) {
        match relocate(&file_report.source, &config.archive_dir) {
            Ok(target) => file_report.archived_to = Some(target),
            Err(e) => {
                log::warn!("Failed to archive {:?}: {}", file_report.source, e);
                report.failed.push((file_report.source.clone(), e.into()));
            }
        }
    }

    Ok(report)
}

/// Dry run of [`process_directory`]: parse everything, write and move nothing.
pub fn preview_directory(config: &ConverterConfig) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for path in list_input_files(config)? {
        match preview_file(&path, config) {
            Ok(file_report) => report.converted.push(file_report),
            Err(e) => report.failed.push((path, e)),
        }
    }

    Ok(report)
}

/// Move `source` into `archive_dir`, replacing a file of the same name.
///
/// Falls back to copy and delete when a plain rename is not possible, e.g.
/// across filesystems.
pub fn relocate(source: &Path, archive_dir: &Path) -> io::Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{:?} has no file name", source),
        )
    })?;
    let target = archive_dir.join(file_name);

    if fs::rename(source, &target).is_err() {
        fs::copy(source, &target)?;
        fs::remove_file(source)?;
    }

    log::info!("Archived {:?} to {:?}", source, target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GOOD: &str = r#"<en-export>
  <note><title>Shopping List</title><content><![CDATA[<en-note><div>Milk</div></en-note>]]></content><updated>20230102T030405Z</updated></note>
  <note><title>Meeting: Notes</title><content><![CDATA[<en-note>Agenda</en-note>]]></content></note>
</en-export>"#;

    fn setup() -> (TempDir, ConverterConfig) {
        let temp = TempDir::new().unwrap();
        let config = ConverterConfig {
            input_dir: temp.path().join("input_files"),
            output_dir: temp.path().join("output_files"),
            archive_dir: temp.path().join("extracted_files"),
            ..Default::default()
        };
        fs::create_dir_all(&config.input_dir).unwrap();
        config.ensure_dirs().unwrap();
        (temp, config)
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_empty_input_dir() {
        let (_temp, config) = setup();
        let report = process_directory(&config).unwrap();

        assert!(report.converted.is_empty());
        assert!(!report.has_failures());
        assert!(names(&config.output_dir).is_empty());
        assert!(names(&config.archive_dir).is_empty());
    }

    #[test]
    fn test_converts_and_archives() {
        let (_temp, config) = setup();
        fs::write(config.input_dir.join("notes.enex"), GOOD).unwrap();

        let report = process_directory(&config).unwrap();

        assert!(!report.has_failures());
        assert_eq!(report.notes_written(), 2);
        assert_eq!(names(&config.output_dir), vec!["Meeting- Notes.txt", "Shopping List.txt"]);
        assert!(names(&config.input_dir).is_empty());
        assert_eq!(names(&config.archive_dir), vec!["notes.enex"]);
        assert_eq!(
            report.converted[0].archived_to,
            Some(config.archive_dir.join("notes.enex"))
        );
    }

    #[test]
    fn test_bad_file_isolated() {
        let (_temp, config) = setup();
        fs::write(config.input_dir.join("a_bad.enex"), "<en-export><note>").unwrap();
        fs::write(config.input_dir.join("b_good.enex"), GOOD).unwrap();

        let report = process_directory(&config).unwrap();

        assert!(report.has_failures());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, config.input_dir.join("a_bad.enex"));
        assert_eq!(names(&config.input_dir), vec!["a_bad.enex"]);
        assert_eq!(names(&config.archive_dir), vec!["b_good.enex"]);
        assert_eq!(names(&config.output_dir).len(), 2);
    }

    #[test]
    fn test_file_with_skipped_note_not_archived() {
        let (_temp, config) = setup();
        fs::write(
            config.input_dir.join("partial.enex"),
            "<en-export><note><content>x</content></note><note><title>ok</title><content>y</content></note></en-export>",
        )
        .unwrap();

        let report = process_directory(&config).unwrap();

        assert!(report.has_failures());
        assert_eq!(report.notes_written(), 1);
        assert_eq!(report.notes_skipped(), 1);
        assert_eq!(names(&config.input_dir), vec!["partial.enex"]);
        assert!(names(&config.archive_dir).is_empty());
    }

    #[test]
    fn test_ignores_subdirs_and_other_files() {
        let (_temp, config) = setup();
        fs::create_dir(config.input_dir.join("nested.enex")).unwrap();
        fs::write(config.input_dir.join("nested.enex").join("inner.enex"), GOOD).unwrap();
        fs::write(config.input_dir.join("readme.md"), "hi").unwrap();

        assert!(list_input_files(&config).unwrap().is_empty());

        let report = process_directory(&config).unwrap();
        assert!(report.converted.is_empty());
        assert_eq!(names(&config.input_dir), vec!["nested.enex", "readme.md"]);
    }

    #[test]
    fn test_preview_directory_moves_nothing() {
        let (_temp, config) = setup();
        fs::write(config.input_dir.join("notes.enex"), GOOD).unwrap();

        let report = preview_directory(&config).unwrap();

        assert_eq!(report.notes_written(), 2);
        assert_eq!(names(&config.input_dir), vec!["notes.enex"]);
        assert!(names(&config.output_dir).is_empty());
        assert!(names(&config.archive_dir).is_empty());
    }

    #[test]
    fn test_relocate_replaces_existing() {
        let (_temp, config) = setup();
        let source = config.input_dir.join("x.enex");
        fs::write(&source, "new").unwrap();
        fs::write(config.archive_dir.join("x.enex"), "old").unwrap();

        let target = relocate(&source, &config.archive_dir).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(target).unwrap(), "new");
    }

    #[test]
    fn test_missing_input_dir_is_error() {
        let (temp, mut config) = setup();
        config.input_dir = temp.path().join("missing");
        assert!(matches!(process_directory(&config), Err(ConvertError::Io(_))));
    }
}
