//! Error types for wordbook operations.

use thiserror::Error;

/// Errors that can occur while building a wordbook.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid word list: {0}")]
    InvalidWordList(String),

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    #[error("Lexicon lookup failed: {0}")]
    Lookup(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("You must choose an output file name or an output type")]
    MissingConfiguration,

    #[error("Render failed: {0}")]
    Render(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
