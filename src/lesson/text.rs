//! Line-oriented word lists.
//!
//! Lines starting with `#` open a new lesson (the name is the line with
//! surrounding `#` stripped); every other non-blank line is a word of the
//! current lesson. Content before any header lands in an implicit `Words`
//! lesson.

use std::path::Path;

use super::Lesson;
use crate::error::Result;
use crate::util::decode_text;

/// Name of the lesson created when words precede any `#` header.
const IMPLICIT_LESSON: &str = "Words";

pub fn parse(path: &Path) -> Result<Vec<Lesson>> {
    let bytes = std::fs::read(path)?;
    let text = decode_text(&bytes, None);
    Ok(parse_str(&text))
}

fn parse_str(text: &str) -> Vec<Lesson> {
    let mut lessons: Vec<Lesson> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            lessons.push(Lesson::new(line.trim_matches('#')));
        } else {
            if lessons.is_empty() {
                lessons.push(Lesson::new(IMPLICIT_LESSON));
            }
            if let Some(current) = lessons.last_mut() {
                current.words.push(line.to_string());
            }
        }
    }
    lessons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_open_lessons() {
        let lessons = parse_str("#Lesson 1\none\ntwo\n\n#Lesson 2\nthree\n");
        assert_eq!(lessons.len(), 2);
        assert_eq!(lessons[0].name, "Lesson 1");
        assert_eq!(lessons[0].words, vec!["one", "two"]);
        assert_eq!(lessons[1].name, "Lesson 2");
        assert_eq!(lessons[1].words, vec!["three"]);
    }

    #[test]
    fn test_implicit_lesson() {
        let lessons = parse_str("one\n#Later\ntwo\n");
        assert_eq!(lessons[0].name, "Words");
        assert_eq!(lessons[0].words, vec!["one"]);
        assert_eq!(lessons[1].words, vec!["two"]);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let lessons = parse_str("#A\r\n\r\none\r\n");
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].words, vec!["one"]);
    }

    #[test]
    fn test_header_only_lesson_is_empty() {
        let lessons = parse_str("#Quiet\n");
        assert_eq!(lessons.len(), 1);
        assert!(lessons[0].words.is_empty());
    }
}
