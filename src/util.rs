//! Text decoding helpers.

use std::borrow::Cow;

/// Decode bytes to a string, handling the encodings word lists show up in.
///
/// 1. A UTF-16 byte order mark wins outright (spreadsheet exports on Windows).
/// 2. Otherwise UTF-8 is tried first (handles the UTF-8 BOM automatically).
/// 3. If malformed, the hint encoding (when the caller has one) is tried.
/// 4. Falls back to Windows-1252, a superset of ISO-8859-1.
///
/// Uses `Cow<str>` to avoid allocation when the input is already valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        let (result, _, _) = encoding_rs::UTF_16LE.decode(bytes);
        return result;
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let (result, _, _) = encoding_rs::UTF_16BE.decode(bytes);
        return result;
    }

    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Escape special HTML characters in text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_borrows() {
        let decoded = decode_text("héllo".as_bytes(), None);
        assert_eq!(decoded, "héllo");
        assert!(matches!(decoded, Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "wörd".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        // BOM is consumed by the decoder
        assert_eq!(decode_text(&bytes, None), "wörd");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is é in CP1252 and invalid as a standalone UTF-8 byte
        assert_eq!(decode_text(&[0x63, 0x61, 0x66, 0xE9], None), "café");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Hello"), "Hello");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#"Say "hi""#), "Say &quot;hi&quot;");
    }
}
