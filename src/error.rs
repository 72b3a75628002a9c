use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole run or a whole input file.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error in {}: {message}", display_source(.path))]
    Xml {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("File '{}' not found.", .0.display())]
    InputNotFound(PathBuf),
}

impl ConvertError {
    /// Attach the source file to an XML error raised while parsing a string.
    pub fn with_path(self, file: &std::path::Path) -> Self {
        match self {
            ConvertError::Xml { message, .. } => ConvertError::Xml {
                path: Some(file.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}

impl From<toml::de::Error> for ConvertError {
    fn from(e: toml::de::Error) -> Self {
        ConvertError::Config(e.to_string())
    }
}

/// Errors confined to a single note; the rest of the file still converts.
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("note #{index}: missing required field <{field}>")]
    MissingField { index: usize, field: &'static str },

    #[error("note #{index}: malformed <{field}>: {reason}")]
    MalformedField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("note '{title}': {source}")]
    Write {
        title: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why an `<updated>` value yielded no timestamp.
#[derive(Error, Debug, PartialEq)]
pub enum TimestampError {
    #[error("no YYYYMMDDTHHMMSSZ token found")]
    NoToken,

    #[error("invalid timestamp '{token}': {reason}")]
    Invalid { token: String, reason: String },
}

fn display_source(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<input>".to_string())
}

pub type Result<T> = std::result::Result<T, ConvertError>;
