//! Streaming `.enex` reader
//!
//! Every `<note>` element not nested in another note yields one [`RawNote`]. Only direct
//! children named `title`, `content` and `updated` are read; anything else
//! inside a note is skipped.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;

use super::note::{Note, RawNote};
use crate::config::StripMode;
use crate::error::{ConvertError, NoteError, Result};

/// Outcome for one note: converted, or the reason it was skipped
pub type NoteResult = std::result::Result<Note, NoteError>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Title,
    Content,
    Updated,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"content" => Some(Field::Content),
            b"updated" => Some(Field::Updated),
            _ => None,
        }
    }

    /// Later occurrences of a field replace earlier ones.
    fn assign(self, note: &mut RawNote, value: String) {
        match self {
            Field::Title => note.title = Some(value),
            Field::Content => note.content = Some(value),
            Field::Updated => note.updated = Some(value),
        }
    }
}

fn xml_error(message: String) -> ConvertError {
    ConvertError::Xml {
        path: None,
        message,
    }
}

/// Unescaped text of a text node. HTML-only entities such as `&nbsp;` are
/// undefined in XML and make the document malformed.
fn text_of(e: &BytesText<'_>) -> Result<String> {
    e.unescape()
        .map(|text| text.into_owned())
        .map_err(|err| xml_error(format!("{}", err)))
}

fn is_blank(e: &BytesText<'_>) -> bool {
    e.iter().all(|b| b.is_ascii_whitespace())
}

/// Read the raw fields of every note in an ENEX document.
///
/// Fails when the document is not well-formed: syntax errors, mismatched end
/// tags, undefined entities, elements left open at the end of input, no root
/// element, or anything but whitespace and comments outside the root.
pub fn read_raw_notes(xml: &str) -> Result<Vec<RawNote>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut notes = Vec::new();
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut root_closed = false;
    let mut current_note: Option<RawNote> = None;
    let mut note_depth = 0usize;
    let mut current_field: Option<(Field, String)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_) | Event::Empty(_)) if root_closed => {
                return Err(xml_error("content after the root element".to_string()));
            }
            Ok(Event::CData(_)) if depth == 0 => {
                return Err(xml_error("text outside the root element".to_string()));
            }
            Ok(Event::Text(ref e)) if depth == 0 && !is_blank(e) => {
                return Err(xml_error("text outside the root element".to_string()));
            }
            Ok(Event::Start(ref e)) => {
                depth += 1;
                saw_root = true;
                let name = e.name();

                if current_note.is_none() {
                    if name.as_ref() == b"note" {
                        current_note = Some(RawNote::new(notes.len()));
                        note_depth = depth;
                    }
                } else if current_field.is_none() && depth == note_depth + 1 {
                    if let Some(field) = Field::from_tag(name.as_ref()) {
                        current_field = Some((field, String::new()));
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                saw_root = true;
                root_closed = depth == 0;
                let name = e.name();

                match current_note.as_mut() {
                    None if name.as_ref() == b"note" => notes.push(RawNote::new(notes.len())),
                    Some(note) if current_field.is_none() && depth == note_depth => {
                        if let Some(field) = Field::from_tag(name.as_ref()) {
                            field.assign(note, String::new());
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                if depth == note_depth + 1 {
                    if let (Some(note), Some((field, value))) =
                        (current_note.as_mut(), current_field.take())
                    {
                        field.assign(note, value);
                    }
                } else if depth == note_depth {
                    notes.extend(current_note.take());
                }
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
            }
            Ok(Event::Text(ref e)) => {
                if let Some((_, value)) = current_field.as_mut() {
                    value.push_str(&text_of(e)?);
                }
            }
            Ok(Event::CData(ref e)) => {
                // Content is typically in CDATA
                if let Some((_, value)) = current_field.as_mut() {
                    value.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(xml_error(format!(
                    "{} (at byte {})",
                    e,
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(xml_error("no element found".to_string()));
    }
    if depth != 0 {
        return Err(xml_error(format!(
            "unexpected end of document: {} element(s) left open",
            depth
        )));
    }

    Ok(notes)
}

/// Parse an ENEX document into per-note results.
///
/// The outer error covers the whole document; the inner results let one bad
/// note be skipped without losing its siblings.
pub fn parse_enex(xml: &str, mode: StripMode) -> Result<Vec<NoteResult>> {
    let notes = read_raw_notes(xml)?
        .into_iter()
        .map(|raw| raw.into_note(mode))
        .collect();
    Ok(notes)
}

/// Read and parse an ENEX file from disk
pub fn parse_enex_file(path: &Path, mode: StripMode) -> Result<Vec<NoteResult>> {
    if !path.is_file() {
        return Err(ConvertError::InputNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    parse_enex(&content, mode).map_err(|e| e.with_path(path))
}
