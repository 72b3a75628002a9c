//! Evernote `.enex` to plain-text conversion.
//!
//! [`enex`] reads export files into notes, [`export`] writes them out as text
//! files and handles directory batches. Everything is driven by an explicit
//! [`ConverterConfig`].

pub mod config;
pub mod enex;
pub mod error;
pub mod export;

pub use config::{ConverterConfig, StripMode};
pub use error::{ConvertError, NoteError, TimestampError};
