//! In-memory lexicon for tests and embedding.

use std::collections::BTreeMap;

use super::LexiconIndex;
use crate::error::Result;

/// A [`LexiconIndex`] backed by plain maps.
///
/// Media keys use the internal backslash-delimited form with a leading
/// backslash (e.g. `\img\cat.png`), matching what packaged dictionaries store.
#[derive(Debug, Clone, Default)]
pub struct MemoryLexicon {
    terms: BTreeMap<String, Vec<String>>,
    media: BTreeMap<String, Vec<u8>>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition for a term (terms may carry several).
    pub fn with_term(mut self, term: impl Into<String>, markup: impl Into<String>) -> Self {
        self.terms.entry(term.into()).or_default().push(markup.into());
        self
    }

    /// Add a media payload under an internal key.
    pub fn with_media(mut self, key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.media.insert(key.into(), data.into());
        self
    }
}

impl LexiconIndex for MemoryLexicon {
    fn exact_lookup(&self, term: &str) -> Result<Vec<String>> {
        Ok(self.terms.get(term).cloned().unwrap_or_default())
    }

    fn case_insensitive_lookup(&self, term: &str) -> Result<Vec<String>> {
        let folded = term.to_lowercase();
        let mut results = Vec::new();
        for (key, defs) in &self.terms {
            if key.to_lowercase() == folded {
                results.extend(defs.iter().cloned());
            }
        }
        Ok(results)
    }

    fn has_media_store(&self) -> bool {
        !self.media.is_empty()
    }

    fn media_lookup(&self, path: &str) -> Result<Vec<Vec<u8>>> {
        Ok(self.media.get(path).cloned().into_iter().collect())
    }

    fn media_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let matches = |key: &str| match pattern.strip_prefix('*') {
            Some(suffix) => key.ends_with(suffix),
            None => key == pattern,
        };
        Ok(self
            .media
            .keys()
            .filter(|k| matches(k))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_keys_suffix_glob() {
        let lex = MemoryLexicon::new()
            .with_media("\\style.css", b"body {}".to_vec())
            .with_media("\\img\\cat.png", b"\x89PNG".to_vec());

        assert_eq!(lex.media_keys("*style.css").unwrap(), vec!["\\style.css"]);
        assert_eq!(lex.media_keys("\\img\\cat.png").unwrap(), vec!["\\img\\cat.png"]);
        assert!(lex.media_keys("*.gif").unwrap().is_empty());
    }

    #[test]
    fn test_no_media_store() {
        let lex = MemoryLexicon::new().with_term("a", "b");
        assert!(!lex.has_media_store());
    }
}
