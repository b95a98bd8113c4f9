//! JSON word lists: an array of `{"name": ..., "words": [...]}` objects.

use std::path::Path;

use super::Lesson;
use crate::error::Result;
use crate::util::decode_text;

pub fn parse(path: &Path) -> Result<Vec<Lesson>> {
    let bytes = std::fs::read(path)?;
    let text = decode_text(&bytes, None);
    Ok(serde_json::from_str(&text)?)
}
