//! Stylesheet resolution and media recovery from the dictionary package.
//!
//! Both operations are best-effort: a stylesheet that cannot be found yields
//! an empty string, a media entry that cannot be found is skipped. Errors
//! raised by the lexicon index itself still propagate.

use std::collections::HashSet;
use std::path::Path;

use log::{debug, warn};

use crate::assemble::fragment;
use crate::doc::{AssembledDocument, DocumentHead};
use crate::error::Result;
use crate::lexicon::LexiconIndex;
use crate::util::decode_text;

/// Layout rules for the two-pane template, appended to the merged stylesheet
/// when the table of contents is enabled.
pub const LAYOUT_STYLES: &str = "\
a.lesson {font-size:120%; color: #1a237e; text-decoration: none; cursor: pointer;}
a.lesson:hover {background-color: #e3f2fd}
a.word {color: #1565c0; text-decoration: none; cursor: pointer;}
a.word:hover {background-color: #e3f2fd;}
div.main {width: 100%; height: 100%;}
div.left {width: 150px; overflow: auto; float: left; height: 100%;}
div.right {overflow-y: auto; overflow-x: hidden; padding-left: 10px; height: 100%;}
";

/// Resolve the stylesheet referenced by the hoisted document head.
///
/// Prefers a file on disk next to the dictionary; falls back to a same-named
/// entry in the embedded media store; resolves to empty when neither exists.
pub fn resolve_stylesheet(
    head: &DocumentHead,
    base_dir: &Path,
    index: &dyn LexiconIndex,
    with_toc: bool,
) -> Result<String> {
    let mut css = match &head.stylesheet_href {
        Some(href) => load_stylesheet(href, base_dir, index)?,
        None => String::new(),
    };
    if with_toc {
        css.push_str(LAYOUT_STYLES);
    }
    Ok(css)
}

fn load_stylesheet(href: &str, base_dir: &Path, index: &dyn LexiconIndex) -> Result<String> {
    let disk_path = base_dir.join(href);
    if disk_path.exists() {
        let bytes = std::fs::read(&disk_path)?;
        return Ok(decode_text(&bytes, None).into_owned());
    }

    if index.has_media_store() {
        let keys = index.media_keys(&format!("*{href}"))?;
        if let Some(key) = keys.first() {
            let payloads = index.media_lookup(key)?;
            if let Some(data) = payloads.first() {
                return Ok(decode_text(data, None).into_owned());
            }
        }
    }

    warn!("stylesheet \"{href}\" not found on disk or in the media store");
    Ok(String::new())
}

/// Pull referenced media out of the embedded store onto disk and normalize
/// the image references in the document.
///
/// External references keep forward slashes and lose any leading slash;
/// store lookups use the backslash-delimited internal form. De-duplication
/// is case-folded so two spellings of one asset resolve to a single dump.
pub fn extract_media(
    doc: &mut AssembledDocument,
    index: &dyn LexiconIndex,
    out_dir: &Path,
) -> Result<()> {
    if !index.has_media_store() {
        return Ok(());
    }

    let mut grabbed: HashSet<String> = HashSet::new();
    for section in doc.sections.iter() {
        for word in &section.words {
            for src in fragment::image_sources(&word.body) {
                let relative = src.trim_start_matches('/');
                let key = internal_key(relative);
                if !grabbed.insert(key.to_lowercase()) {
                    continue;
                }
                let payloads = index.media_lookup(&key)?;
                let Some(data) = payloads.first() else {
                    debug!("media entry {key} not in store; skipping");
                    continue;
                };
                println!("dump {relative}");
                let target = out_dir.join(relative.replace('\\', "/"));
                if let Some(parent) = target.parent() {
                    // Already-existing directories are fine.
                    let _ = std::fs::create_dir_all(parent);
                }
                std::fs::write(&target, data)?;
            }
        }
    }

    for section in doc.sections.iter_mut() {
        for word in section.words.iter_mut() {
            word.body = fragment::rewrite_image_sources(&word.body, |src| {
                src.strip_prefix('/').map(|s| s.to_string())
            });
        }
    }
    Ok(())
}

/// External path -> backslash-delimited internal store key.
fn internal_key(path: &str) -> String {
    format!("\\{}", path.trim_start_matches('\\').replace('/', "\\"))
}
