//! Definition fragments arrive as standalone mini-documents, each dragging
//! its own head/body shell along. This module splits out the pieces the
//! assembler needs without a full DOM pass.
//!
//! Patterns are compiled once on first use via `LazyLock`.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Matches the `<head>` element and captures its inner markup.
static HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head[^>]*>(.*?)</head>").unwrap());

/// Matches the `<body>` element and captures its inner markup.
static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").unwrap());

/// Matches `<link ... href="...">` tags.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<link\s[^>]*href\s*=\s*["']([^"']+)["'][^>]*>"#).unwrap()
});

/// Matches `<img ... src="...">` tags, capturing the src value.
static IMG_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)<img\s[^>]*src\s*=\s*["']([^"']+)["']"#).unwrap());

/// A definition fragment split into its head and body parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Inner markup of the fragment's `<head>`, if it had one.
    pub head: Option<String>,
    /// Inner markup of the fragment's `<body>`; the whole input when the
    /// fragment carries no body wrapper.
    pub body: String,
}

/// Split raw definition markup into head and body.
///
/// Unwrapping the body here is what keeps the final document down to a
/// single body shell; the serializer never has to strip scratch wrappers.
pub fn parse(markup: &str) -> Fragment {
    let head = HEAD_RE
        .captures(markup)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string());
    let body = match BODY_RE.captures(markup).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None => strip_document_shell(markup).trim().to_string(),
    };
    Fragment { head, body }
}

/// With no `<body>` wrapper, drop any bare html/head shell so only content
/// markup remains.
fn strip_document_shell(markup: &str) -> String {
    let without_head = HEAD_RE.replace(markup, "");
    static SHELL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)</?(?:html|!doctype)[^>]*>").unwrap());
    SHELL_RE.replace_all(&without_head, "").into_owned()
}

/// Href of the first `<link>` element in head markup.
pub fn stylesheet_href(head: &str) -> Option<String> {
    LINK_RE
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Head markup with all `<link>` elements removed (the merged stylesheet
/// replaces them).
pub fn strip_stylesheet_links(head: &str) -> String {
    LINK_RE.replace_all(head, "").trim().to_string()
}

/// Every `<img>` src value in document order, duplicates included.
pub fn image_sources(markup: &str) -> Vec<String> {
    IMG_SRC_RE
        .captures_iter(markup)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Rewrite `<img>` src values through the given mapping; `None` keeps the
/// original value.
pub fn rewrite_image_sources(
    markup: &str,
    mut rewrite: impl FnMut(&str) -> Option<String>,
) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut last = 0;
    for caps in IMG_SRC_RE.captures_iter(markup) {
        let Some(m) = caps.get(1) else { continue };
        out.push_str(&markup[last..m.start()]);
        match rewrite(m.as_str()) {
            Some(new_src) => out.push_str(&new_src),
            None => out.push_str(m.as_str()),
        }
        last = m.end();
    }
    out.push_str(&markup[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let markup = concat!(
            "<html><head><meta name=\"x\"/>",
            "<link rel=\"stylesheet\" href=\"dict.css\"/></head>",
            "<body><p>definition</p></body></html>"
        );
        let frag = parse(markup);
        let head = frag.head.unwrap();
        assert!(head.contains("meta"));
        assert_eq!(frag.body, "<p>definition</p>");
        assert_eq!(stylesheet_href(&head).unwrap(), "dict.css");
        assert_eq!(strip_stylesheet_links(&head), "<meta name=\"x\"/>");
    }

    #[test]
    fn test_parse_bare_fragment() {
        let frag = parse("<span><b>WARNING</b></span>");
        assert!(frag.head.is_none());
        assert_eq!(frag.body, "<span><b>WARNING</b></span>");
    }

    #[test]
    fn test_parse_shell_without_body() {
        let frag = parse("<html><head><title>t</title></head><p>loose</p></html>");
        assert_eq!(frag.body, "<p>loose</p>");
    }

    #[test]
    fn test_body_attributes_are_dropped() {
        let frag = parse(r#"<body style="color:red"><i>x</i></body>"#);
        assert_eq!(frag.body, "<i>x</i>");
    }

    #[test]
    fn test_image_sources() {
        let markup = r#"<img src="a.png"/><p/><img class="x" src='b/c.png'>"#;
        assert_eq!(image_sources(markup), vec!["a.png", "b/c.png"]);
    }

    #[test]
    fn test_rewrite_image_sources() {
        let markup = r#"<img src="/a.png"/><img src="b.png"/>"#;
        let out = rewrite_image_sources(markup, |src| {
            src.strip_prefix('/').map(|s| s.to_string())
        });
        assert_eq!(out, r#"<img src="a.png"/><img src="b.png"/>"#);
    }

    #[test]
    fn test_no_stylesheet_link() {
        assert_eq!(stylesheet_href("<meta charset=\"utf-8\"/>"), None);
    }
}
