use chrono::{DateTime, Utc};

use super::markup::strip_markup;
use super::timestamp::parse_updated;
use crate::config::StripMode;
use crate::error::NoteError;

/// Field values of one `<note>` element exactly as they appear in the file
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawNote {
    /// Position of the note in its file, starting at 0
    pub index: usize,
    pub title: Option<String>,
    pub content: Option<String>,
    pub updated: Option<String>,
}

/// A note ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Title as written in the export, before sanitization
    pub title: String,
    /// Plain-text body
    pub contents: String,
    pub updated: Option<DateTime<Utc>>,
}

impl RawNote {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Validate required fields and clean up the body.
    ///
    /// A missing or unparsable `<updated>` is logged and leaves `updated`
    /// empty; it never rejects the note.
    pub fn into_note(self, mode: StripMode) -> Result<Note, NoteError> {
        let title = self.title.ok_or(NoteError::MissingField {
            index: self.index,
            field: "title",
        })?;
        if title.trim().is_empty() {
            return Err(NoteError::MalformedField {
                index: self.index,
                field: "title",
                reason: "title is blank".to_string(),
            });
        }

        let content = self.content.ok_or(NoteError::MissingField {
            index: self.index,
            field: "content",
        })?;

        let updated = match self.updated.as_deref() {
            Some(raw) => match parse_updated(raw) {
                Ok(dt) => Some(dt),
                Err(e) => {
                    log::warn!("Note '{}': ignoring <updated>: {}", title, e);
                    None
                }
            },
            None => None,
        };

        Ok(Note {
            contents: strip_markup(&content, mode),
            title,
            updated,
        })
    }
}
