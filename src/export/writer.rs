use std::fs::{self, File, FileTimes};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

use super::filename::note_file_name;
use crate::enex::Note;

/// Write a note to `<output_dir>/<sanitized title>.<extension>`.
///
/// The body plus a trailing newline goes to a `.tmp` sibling first, gets the
/// note's timestamp as atime and mtime, and is then renamed over the final
/// name. On failure the temporary file is removed and any earlier file of the
/// same name is left untouched.
pub fn write_note(note: &Note, output_dir: &Path, extension: &str) -> io::Result<PathBuf> {
    let file_name = note_file_name(&note.title, extension);
    let path = output_dir.join(&file_name);
    let tmp_path = output_dir.join(format!("{}.tmp", file_name));

    if let Err(e) = write_then_rename(note, &tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    log::debug!("Wrote {:?}", path);
    Ok(path)
}

fn write_then_rename(note: &Note, tmp_path: &Path, path: &Path) -> io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(note.contents.as_bytes())?;
    file.write_all(b"\n")?;

    if let Some(updated) = note.updated {
        match system_time(updated) {
            Some(time) => {
                file.set_times(FileTimes::new().set_accessed(time).set_modified(time))?
            }
            None => log::warn!(
                "Note '{}': {} is outside the platform's file time range, keeping current times",
                note.title,
                updated
            ),
        }
    }
    drop(file);

    fs::rename(tmp_path, path)
}

/// `SystemTime` for `dt`, or None when the platform cannot represent it
/// (e.g. before 1601 on Windows).
pub fn system_time(dt: DateTime<Utc>) -> Option<SystemTime> {
    let secs = dt.timestamp();
    let nanos = Duration::from_nanos(u64::from(dt.timestamp_subsec_nanos()));

    if secs >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(secs as u64) + nanos)
    } else {
        UNIX_EPOCH
            .checked_sub(Duration::from_secs(secs.unsigned_abs()))?
            .checked_add(nanos)
    }
}
