//! File-backed lexicon: a JSON term store with an optional media archive.
//!
//! The dictionary package the CLI consumes is a JSON object mapping terms to
//! definition markup (a string, or an array of strings for homographs). When
//! a sibling `<stem>.media.zip` archive exists it serves as the embedded
//! media store; its entries are addressed by the internal backslash-delimited
//! keys packaged dictionaries use (`\img\cat.png`).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Mutex;

use log::info;
use serde_json::Value;
use zip::ZipArchive;

use super::LexiconIndex;
use crate::error::{Error, Result};
use crate::util::decode_text;

/// Suffix of the media archive expected next to the term store.
const MEDIA_ARCHIVE_SUFFIX: &str = ".media.zip";

pub struct FileLexicon {
    terms: BTreeMap<String, Vec<String>>,
    /// Lowercased term -> definitions, built once for the fallback lookup.
    folded: BTreeMap<String, Vec<String>>,
    /// Internal-form keys of every media entry, in archive order.
    media_names: Vec<String>,
    media: Option<Mutex<ZipArchive<File>>>,
}

impl FileLexicon {
    /// Open a dictionary package from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes, None);
        let terms = parse_terms(&text)?;

        let mut folded: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (term, defs) in &terms {
            folded
                .entry(term.to_lowercase())
                .or_default()
                .extend(defs.iter().cloned());
        }

        let (media_names, media) = match open_media_archive(path)? {
            Some(archive) => {
                let names: Vec<String> = archive
                    .file_names()
                    .map(|n| format!("\\{}", n.replace('/', "\\")))
                    .collect();
                info!(
                    "media store attached: {} entries for {}",
                    names.len(),
                    path.display()
                );
                (names, Some(Mutex::new(archive)))
            }
            None => (Vec::new(), None),
        };

        info!("lexicon loaded: {} terms from {}", terms.len(), path.display());
        Ok(Self {
            terms,
            folded,
            media_names,
            media,
        })
    }
}

fn parse_terms(text: &str) -> Result<BTreeMap<String, Vec<String>>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(Error::InvalidLexicon(
            "term store must be a JSON object".into(),
        ));
    };

    let mut terms = BTreeMap::new();
    for (term, defs) in map {
        let defs = match defs {
            Value::String(s) => vec![s],
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => out.push(s),
                        other => {
                            return Err(Error::InvalidLexicon(format!(
                                "definition of \"{term}\" must be a string, got {other}"
                            )));
                        }
                    }
                }
                out
            }
            other => {
                return Err(Error::InvalidLexicon(format!(
                    "definition of \"{term}\" must be a string or array, got {other}"
                )));
            }
        };
        terms.insert(term, defs);
    }
    Ok(terms)
}

fn open_media_archive(term_store: &Path) -> Result<Option<ZipArchive<File>>> {
    let Some(stem) = term_store.file_stem() else {
        return Ok(None);
    };
    let archive_path = term_store.with_file_name(format!(
        "{}{}",
        stem.to_string_lossy(),
        MEDIA_ARCHIVE_SUFFIX
    ));
    if !archive_path.exists() {
        return Ok(None);
    }
    let file = File::open(&archive_path)?;
    Ok(Some(ZipArchive::new(file)?))
}

/// Internal backslash key -> archive entry name.
fn archive_name(key: &str) -> String {
    key.trim_start_matches('\\').replace('\\', "/")
}

impl LexiconIndex for FileLexicon {
    fn exact_lookup(&self, term: &str) -> Result<Vec<String>> {
        Ok(self.terms.get(term).cloned().unwrap_or_default())
    }

    fn case_insensitive_lookup(&self, term: &str) -> Result<Vec<String>> {
        Ok(self
            .folded
            .get(&term.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    fn has_media_store(&self) -> bool {
        self.media.is_some()
    }

    fn media_lookup(&self, path: &str) -> Result<Vec<Vec<u8>>> {
        let Some(media) = &self.media else {
            return Ok(Vec::new());
        };
        let mut archive = media
            .lock()
            .map_err(|_| Error::Lookup("media store lock poisoned".into()))?;
        match archive.by_name(&archive_name(path)) {
            Ok(mut entry) => {
                let mut data = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut data)?;
                Ok(vec![data])
            }
            Err(zip::result::ZipError::FileNotFound) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn media_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let matches = |key: &str| match pattern.strip_prefix('*') {
            Some(suffix) => key.ends_with(suffix),
            None => key == pattern,
        };
        Ok(self
            .media_names
            .iter()
            .filter(|k| matches(k))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_package(dir: &Path, terms: &str, media: &[(&str, &[u8])]) -> std::path::PathBuf {
        let store = dir.join("dict.json");
        std::fs::write(&store, terms).unwrap();
        if !media.is_empty() {
            let file = File::create(dir.join("dict.media.zip")).unwrap();
            let mut zip = zip::ZipWriter::new(file);
            for (name, data) in media {
                zip.start_file(*name, SimpleFileOptions::default()).unwrap();
                zip.write_all(data).unwrap();
            }
            zip.finish().unwrap();
        }
        store
    }

    #[test]
    fn test_open_terms_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_package(dir.path(), r#"{"one": "<b>1</b>", "Two": ["2a", "2b"]}"#, &[]);
        let lex = FileLexicon::open(&store).unwrap();

        assert_eq!(lex.exact_lookup("one").unwrap(), vec!["<b>1</b>"]);
        assert_eq!(lex.case_insensitive_lookup("two").unwrap(), vec!["2a", "2b"]);
        assert!(lex.exact_lookup("three").unwrap().is_empty());
        assert!(!lex.has_media_store());
    }

    #[test]
    fn test_media_archive_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_package(
            dir.path(),
            r#"{"one": "1"}"#,
            &[("img/cat.png", b"\x89PNG"), ("style.css", b"body {}")],
        );
        let lex = FileLexicon::open(&store).unwrap();

        assert!(lex.has_media_store());
        assert_eq!(lex.media_keys("*style.css").unwrap(), vec!["\\style.css"]);
        assert_eq!(
            lex.media_lookup("\\img\\cat.png").unwrap(),
            vec![b"\x89PNG".to_vec()]
        );
        assert!(lex.media_lookup("\\img\\dog.png").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_object_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_package(dir.path(), r#"["not", "a", "map"]"#, &[]);
        assert!(matches!(
            FileLexicon::open(&store),
            Err(Error::InvalidLexicon(_))
        ));
    }
}
