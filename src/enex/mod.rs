//! Evernote .enex reading
//!
//! Turns an export file into notes ready for writing:
//! - Streaming XML extraction of `title`, `content` and `updated`
//! - ENML/HTML markup stripped down to plain text
//! - `YYYYMMDDTHHMMSSZ` timestamps read as UTC

mod markup;
mod note;
mod parser;
mod timestamp;

pub use markup::strip_markup;
pub use note::{Note, RawNote};
pub use parser::{parse_enex, parse_enex_file, read_raw_notes, NoteResult};
pub use timestamp::parse_updated;
