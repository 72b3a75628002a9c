//! Single-file conversion

use std::path::{Path, PathBuf};

use super::filename::note_file_name;
use super::writer::write_note;
use crate::config::ConverterConfig;
use crate::enex::parse_enex_file;
use crate::error::{NoteError, Result};

/// What happened to the notes of one input file
#[derive(Debug)]
pub struct FileReport {
    pub source: PathBuf,
    /// Output files written, or that would be written in a dry run
    pub outputs: Vec<PathBuf>,
    /// Notes that were skipped
    pub failures: Vec<NoteError>,
    /// Archive location once the source has been moved
    pub archived_to: Option<PathBuf>,
}

impl FileReport {
    fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            outputs: Vec::new(),
            failures: Vec::new(),
            archived_to: None,
        }
    }

    /// True when every note of the file made it to disk
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Convert every note of `path` into a text file under `config.output_dir`.
///
/// An unreadable or malformed file is an error; a bad note is recorded in
/// the report and the remaining notes are still written.
pub fn convert_file(path: &Path, config: &ConverterConfig) -> Result<FileReport> {
    let notes = parse_enex_file(path, config.strip_mode)?;
    let mut report = FileReport::new(path);

    for note in notes {
        let note = match note {
            Ok(note) => note,
            Err(e) => {
                log::warn!("Skipping note in {:?}: {}", path, e);
                report.failures.push(e);
                continue;
            }
        };

        match write_note(&note, &config.output_dir, &config.output_extension) {
            Ok(output) => report.outputs.push(output),
            Err(source) => {
                let e = NoteError::Write {
                    title: note.title,
                    source,
                };
                log::warn!("Skipping note in {:?}: {}", path, e);
                report.failures.push(e);
            }
        }
    }

    log::info!(
        "Converted {:?}: {} note(s) written, {} skipped",
        path,
        report.outputs.len(),
        report.failures.len()
    );
    Ok(report)
}

/// Parse `path` and report the output files its notes would produce,
/// without touching the filesystem.
pub fn preview_file(path: &Path, config: &ConverterConfig) -> Result<FileReport> {
    let notes = parse_enex_file(path, config.strip_mode)?;
    let mut report = FileReport::new(path);

    for note in notes {
        match note {
            Ok(note) => report.outputs.push(
                config
                    .output_dir
                    .join(note_file_name(&note.title, &config.output_extension)),
            ),
            Err(e) => report.failures.push(e),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::error::ConvertError;

    const ENEX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<en-export>
  <note>
    <title>Shopping List</title>
    <content><![CDATA[<en-note><div>Milk</div><div>Eggs</div></en-note>]]></content>
    <updated>20230102T030405Z</updated>
  </note>
  <note>
    <content><![CDATA[<en-note>no title</en-note>]]></content>
  </note>
  <note>
    <title>Meeting: Notes</title>
    <content><![CDATA[<en-note>Agenda</en-note>]]></content>
  </note>
</en-export>"#;

    fn setup() -> (TempDir, ConverterConfig, PathBuf) {
        let temp = TempDir::new().unwrap();
        let config = ConverterConfig {
            output_dir: temp.path().join("out"),
            archive_dir: temp.path().join("done"),
            input_dir: temp.path().join("in"),
            ..Default::default()
        };
        config.ensure_dirs().unwrap();
        let source = temp.path().join("export.enex");
        fs::write(&source, ENEX).unwrap();
        (temp, config, source)
    }

    #[test]
    fn test_convert_file_skips_bad_note() {
        let (_temp, config, source) = setup();
        let report = convert_file(&source, &config).unwrap();

        assert_eq!(report.outputs.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.is_clean());
        assert_eq!(
            fs::read_to_string(config.output_dir.join("Shopping List.txt")).unwrap(),
            "Milk\nEggs\n"
        );
        assert_eq!(
            fs::read_to_string(config.output_dir.join("Meeting- Notes.txt")).unwrap(),
            "Agenda\n"
        );
        // Single-file conversion never moves the source
        assert!(source.exists());
    }

    #[test]
    fn test_write_failure_skips_only_that_note() {
        let (_temp, config, source) = setup();
        fs::create_dir(config.output_dir.join("Shopping List.txt")).unwrap();

        let report = convert_file(&source, &config).unwrap();

        assert_eq!(report.outputs, vec![config.output_dir.join("Meeting- Notes.txt")]);
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures.iter().any(|f| matches!(
            f,
            NoteError::Write { title, .. } if title == "Shopping List"
        )));
    }

    #[test]
    fn test_preview_writes_nothing() {
        let (_temp, config, source) = setup();
        let report = preview_file(&source, &config).unwrap();

        assert_eq!(
            report.outputs,
            vec![
                config.output_dir.join("Shopping List.txt"),
                config.output_dir.join("Meeting- Notes.txt"),
            ]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(fs::read_dir(&config.output_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let (temp, config, _) = setup();
        let bad = temp.path().join("bad.enex");
        fs::write(&bad, "<en-export><note>").unwrap();

        match convert_file(&bad, &config) {
            Err(ConvertError::Xml { path, .. }) => assert_eq!(path, Some(bad)),
            other => panic!("expected XML error, got {:?}", other),
        }
    }
}
