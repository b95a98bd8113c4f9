//! Output emission: deterministic HTML serialization and the miss-report
//! file.

pub mod pdf;

use std::fmt::Write;
use std::path::Path;

use crate::doc::{AssembledDocument, MissReport, NavKind};
use crate::error::Result;
use crate::util::escape_html;

/// Fixed name of the miss-report file, written next to the output document.
pub const INVALID_WORDS_FILENAME: &str = "invalid_words.txt";

const H1_STYLE: &str =
    "color:#FFFFFF; background-color:#003366; padding-left:20px; line-height:initial;";
const H2_STYLE: &str =
    "color:#CCFFFF; background-color:#336699; padding-left:20px; line-height:initial;";

/// Serialize the assembled tree to its textual encoding.
///
/// The output carries exactly one html/head/body shell; fragment body
/// wrappers were unwrapped during assembly, so no scratch markers need
/// stripping here.
pub fn serialize(doc: &AssembledDocument) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("<html>\n<head>\n");
    if !doc.head.hoisted.is_empty() {
        out.push_str(&doc.head.hoisted);
        out.push('\n');
    }
    out.push_str("<meta charset=\"utf-8\"/>\n");
    out.push_str("<style type=\"text/css\">\n");
    out.push_str(&doc.stylesheet);
    if !doc.stylesheet.ends_with('\n') && !doc.stylesheet.is_empty() {
        out.push('\n');
    }
    out.push_str("</style>\n</head>\n");
    out.push_str("<body style=\"font-family:Arial Unicode MS;\">\n");

    if doc.with_toc {
        out.push_str("<div class=\"main\">\n");
        write_nav_pane(&mut out, doc);
        write_content_pane(&mut out, doc);
        out.push_str("</div>\n");
    } else {
        write_content_pane(&mut out, doc);
    }

    out.push_str("</body>\n</html>\n");
    out.into_bytes()
}

fn write_nav_pane(out: &mut String, doc: &AssembledDocument) {
    out.push_str("<div class=\"left\">\n");
    for (i, entry) in doc.nav.entries.iter().enumerate() {
        let class = match entry.kind {
            NavKind::Lesson => {
                // Blank line between lesson groups
                if i > 0 {
                    out.push_str("<br/>\n");
                }
                "lesson"
            }
            NavKind::Word => "word",
        };
        writeln!(
            out,
            "<a class=\"{class}\" href=\"#{}\">{}</a><br/>",
            escape_html(&entry.anchor),
            escape_html(&entry.label)
        )
        .unwrap();
    }
    if !doc.nav.entries.is_empty() {
        out.push_str("<br/>\n");
    }
    out.push_str("</div>\n");
}

fn write_content_pane(out: &mut String, doc: &AssembledDocument) {
    out.push_str("<div class=\"right\">\n");
    for section in &doc.sections {
        writeln!(
            out,
            "<h1 id=\"{}\" style=\"{H1_STYLE}\">{}</h1>",
            escape_html(&section.anchor),
            escape_html(&section.title)
        )
        .unwrap();
        for word in &section.words {
            writeln!(
                out,
                "<h2 id=\"{}\" style=\"{H2_STYLE}\">{}</h2>",
                escape_html(&word.anchor),
                escape_html(&word.term)
            )
            .unwrap();
            out.push_str(&word.body);
            out.push('\n');
        }
    }
    out.push_str("</div>\n");
}

/// Write the serialized document to disk.
pub fn write_document(doc: &AssembledDocument, out_path: &Path) -> Result<()> {
    std::fs::write(out_path, serialize(doc))?;
    Ok(())
}

/// Write the miss report next to the output file.
///
/// Nothing is written when the report is empty; returns whether a file was
/// produced.
pub fn write_miss_report(misses: &MissReport, out_path: &Path) -> Result<bool> {
    if misses.is_empty() {
        return Ok(false);
    }
    let dir = out_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::write(dir.join(INVALID_WORDS_FILENAME), misses.to_text())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{ContentSection, NavigationIndex, WordEntry, lesson_anchor, word_anchor};

    fn sample_doc(with_toc: bool) -> AssembledDocument {
        let mut nav = NavigationIndex::default();
        nav.push(NavKind::Lesson, "Numbers", lesson_anchor("Numbers"));
        nav.push(NavKind::Word, "one", word_anchor("one"));
        AssembledDocument {
            sections: vec![ContentSection {
                title: "Numbers".into(),
                anchor: lesson_anchor("Numbers"),
                words: vec![WordEntry {
                    term: "one".into(),
                    anchor: word_anchor("one"),
                    body: "<p>1</p>".into(),
                }],
            }],
            nav,
            stylesheet: "p { margin: 0; }".into(),
            with_toc,
            ..Default::default()
        }
    }

    #[test]
    fn test_serialize_two_pane_layout() {
        let html = String::from_utf8(serialize(&sample_doc(true))).unwrap();

        assert!(html.contains("<div class=\"main\">"));
        assert!(html.contains("<div class=\"left\">"));
        assert!(html.contains("<a class=\"lesson\" href=\"#lesson_Numbers\">Numbers</a>"));
        assert!(html.contains("<a class=\"word\" href=\"#word_one\">one</a>"));
        assert!(html.contains("<h1 id=\"lesson_Numbers\""));
        assert!(html.contains("<h2 id=\"word_one\""));
        assert!(html.contains("<p>1</p>"));
        assert!(html.contains("<style type=\"text/css\">"));
    }

    #[test]
    fn test_serialize_without_toc_has_no_nav_pane() {
        let html = String::from_utf8(serialize(&sample_doc(false))).unwrap();
        assert!(!html.contains("div class=\"main\""));
        assert!(!html.contains("div class=\"left\""));
        assert!(html.contains("div class=\"right\""));
    }

    #[test]
    fn test_serialize_single_body_shell() {
        let html = String::from_utf8(serialize(&sample_doc(true))).unwrap();
        assert_eq!(html.matches("<body").count(), 1);
        assert_eq!(html.matches("</body>").count(), 1);
    }

    #[test]
    fn test_serialize_escapes_names() {
        let mut doc = sample_doc(false);
        doc.sections[0].title = "A & B".into();
        let html = String::from_utf8(serialize(&doc)).unwrap();
        assert!(html.contains("A &amp; B"));
    }

    #[test]
    fn test_miss_report_only_when_nonempty() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("book.html");

        assert!(!write_miss_report(&MissReport::new(), &out).unwrap());
        assert!(!dir.path().join(INVALID_WORDS_FILENAME).exists());

        let mut misses = MissReport::new();
        misses.record("Numbers", "missing");
        assert!(write_miss_report(&misses, &out).unwrap());
        let written = std::fs::read_to_string(dir.path().join(INVALID_WORDS_FILENAME)).unwrap();
        assert_eq!(written, "#Numbers\nmissing\n");
    }
}
