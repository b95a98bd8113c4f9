//! Word-list loading.
//!
//! A word list is an ordered sequence of lessons, each a named group of
//! words. Three formats are supported, dispatched on the file extension:
//! JSON (`[{"name": ..., "words": [...]}]`), plain text (`#` lines open a
//! lesson), and xlsx spreadsheets (one sheet per lesson, first column =
//! words).

mod json;
mod sheet;
mod text;

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// A named group of words, the organizing unit of the output document.
///
/// Created once by the loader, immutable for the rest of the run. The word
/// list may be empty; the name may not.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lesson {
    pub name: String,
    #[serde(default)]
    pub words: Vec<String>,
}

impl Lesson {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            words: Vec::new(),
        }
    }

    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words = words.into_iter().map(Into::into).collect();
        self
    }
}

/// Load lessons from a word-list file, choosing the parser by extension.
pub fn load_lessons(path: impl AsRef<Path>) -> Result<Vec<Lesson>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let lessons = match ext.as_str() {
        "json" => json::parse(path)?,
        "txt" => text::parse(path)?,
        // Legacy binary .xls is not a zip container and fails downstream
        // with a clear archive error.
        "xls" | "xlsx" => sheet::parse(path)?,
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "unknown word list extension: \"{other}\" ({})",
                path.display()
            )));
        }
    };

    for lesson in &lessons {
        if lesson.name.is_empty() {
            return Err(Error::InvalidWordList(format!(
                "empty lesson name in {}",
                path.display()
            )));
        }
    }
    Ok(lessons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extension() {
        let err = load_lessons("words.csv").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_no_extension() {
        assert!(matches!(
            load_lessons("words"),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
