//! Lexicon access: the opaque dictionary index and the lookup fallback chain.
//!
//! The index itself is a black box behind [`LexiconIndex`]; this module only
//! knows how to chain exact and case-insensitive lookups and follow a single
//! `@@@LINK=` redirect hop. Two implementations ship with the crate:
//! [`MemoryLexicon`] for tests and embedding, and [`FileLexicon`] backed by a
//! JSON term store plus an optional zipped media archive.

mod memory;
mod store;

pub use memory::MemoryLexicon;
pub use store::FileLexicon;

use crate::error::Result;

/// Marker prefixing a definition whose real body lives under another key.
pub const REDIRECT_PREFIX: &str = "@@@LINK=";

/// Opaque key-value dictionary index.
///
/// Definition lookups return zero or more raw markup fragments; media lookups
/// address an embedded binary store keyed by backslash-delimited paths.
/// Any error from an implementation is treated as fatal by the pipeline.
pub trait LexiconIndex {
    /// Exact-match definition lookup.
    fn exact_lookup(&self, term: &str) -> Result<Vec<String>>;

    /// Case-insensitive definition lookup.
    fn case_insensitive_lookup(&self, term: &str) -> Result<Vec<String>>;

    /// Whether this index carries an embedded media store.
    fn has_media_store(&self) -> bool;

    /// Binary payloads stored under the given internal key.
    fn media_lookup(&self, path: &str) -> Result<Vec<Vec<u8>>>;

    /// Media keys matching a glob pattern (`*suffix` is the only form the
    /// pipeline uses).
    fn media_keys(&self, pattern: &str) -> Result<Vec<String>>;
}

/// Look up a term, falling back to a case-insensitive match and following at
/// most one redirect hop. An empty string means the term was not found.
pub fn lookup(index: &dyn LexiconIndex, term: &str) -> Result<String> {
    let term = term.trim();
    let mut definitions = index.exact_lookup(term)?;
    if definitions.is_empty() {
        definitions = index.case_insensitive_lookup(term)?;
    }
    let Some(definition) = definitions.into_iter().next() else {
        return Ok(String::new());
    };
    if let Some(target) = definition.strip_prefix(REDIRECT_PREFIX) {
        // One hop only; a dangling redirect counts as a miss.
        let redirected = index.exact_lookup(target.trim())?;
        return Ok(redirected
            .into_iter()
            .next()
            .map(|d| d.trim().to_string())
            .unwrap_or_default());
    }
    Ok(definition.trim().to_string())
}
