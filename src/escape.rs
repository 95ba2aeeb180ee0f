//! Text utilities for XML output and free-text input.
//!
//! Escaping protects element text, [`split_cdata`] keeps CDATA sections well
//! formed, and [`strip_tags`] removes markup from caller-supplied text before
//! it is stored on an offer. Control characters XML 1.0 does not allow are
//! dropped on every path.

use memchr::{memchr, memchr3, memmem};
use std::borrow::Cow;

/// Escapes XML special characters in a string.
///
/// Returns a `Cow<str>` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !needs_escape(s.as_bytes()) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + s.len() / 8);
    escape_to(s, &mut result);
    Cow::Owned(result)
}

/// Checks if a byte slice needs escaping.
#[inline]
fn needs_escape(bytes: &[u8]) -> bool {
    memchr3(b'<', b'>', b'&', bytes).is_some()
        || memchr::memchr2(b'"', b'\'', bytes).is_some()
        || has_forbidden_control(bytes)
}

// Tab, line feed and carriage return are the only C0 controls XML allows.
#[inline]
fn is_forbidden_control(byte: u8) -> bool {
    byte < 0x20 && !matches!(byte, b'\t' | b'\n' | b'\r')
}

#[inline]
fn has_forbidden_control(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| is_forbidden_control(b))
}

/// Removes C0 control characters that XML 1.0 forbids.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !has_forbidden_control(s.as_bytes()) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .filter(|c| !c.is_ascii() || !is_forbidden_control(*c as u8))
            .collect(),
    )
}

/// Escapes XML special characters and appends to the given string.
#[inline]
pub fn escape_to(s: &str, out: &mut String) {
    let mut start = 0;

    for (i, byte) in s.bytes().enumerate() {
        let escaped = match byte {
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'&' => "&amp;",
            b'"' => "&quot;",
            b'\'' => "&apos;",
            b if is_forbidden_control(b) => "",
            _ => continue,
        };

        // Only ASCII bytes are replaced, so `i` is always a char boundary.
        out.push_str(&s[start..i]);
        out.push_str(escaped);
        start = i + 1;
    }

    out.push_str(&s[start..]);
}

/// Splits CDATA content so that no piece contains the `]]>` terminator.
///
/// Each piece is written as its own CDATA section; readers concatenate
/// adjacent sections back into the original text.
pub fn split_cdata(data: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for pos in memmem::find_iter(data.as_bytes(), b"]]>") {
        parts.push(&data[start..pos + 2]);
        start = pos + 2;
    }

    parts.push(&data[start..]);
    parts
}

/// Removes markup from free text.
///
/// Every `<...>` run is deleted, not escaped. A `>` inside a quoted
/// attribute value does not end the tag. A `<` followed by whitespace or at
/// the very end of the input is ordinary text. A tag that never closes
/// swallows the rest of the input. Forbidden control characters are removed.
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    if memchr(b'<', bytes).is_none() {
        return strip_control_chars(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut start = 0;
    let mut search = 0;

    while let Some(offset) = memchr(b'<', &bytes[search..]) {
        let open = search + offset;
        match bytes.get(open + 1) {
            None => break,
            Some(next) if next.is_ascii_whitespace() => {
                search = open + 1;
                continue;
            }
            Some(_) => {}
        }

        out.push_str(&s[start..open]);
        match find_tag_end(&bytes[open + 1..]) {
            Some(close) => {
                start = open + close + 2;
                search = start;
            }
            None => {
                start = bytes.len();
                break;
            }
        }
    }

    out.push_str(&s[start..]);
    if has_forbidden_control(out.as_bytes()) {
        out.retain(|c| !c.is_ascii() || !is_forbidden_control(c as u8));
    }
    Cow::Owned(out)
}

/// Offset of the `>` closing a tag body, skipping quoted runs.
fn find_tag_end(body: &[u8]) -> Option<usize> {
    let mut pos = 0;
    while let Some(offset) = memchr3(b'>', b'"', b'\'', &body[pos..]) {
        let at = pos + offset;
        let quote = body[at];
        if quote == b'>' {
            return Some(at);
        }
        let close = memchr(quote, &body[at + 1..])?;
        pos = at + close + 2;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_no_special_chars() {
        let s = "Hello, World!";
        let escaped = escape(s);
        assert!(matches!(escaped, Cow::Borrowed(_)));
        assert_eq!(escaped, s);
    }

    #[test]
    fn test_escape_mixed() {
        assert_eq!(
            escape("<div class=\"foo\">Tom's & Jerry's</div>"),
            "&lt;div class=&quot;foo&quot;&gt;Tom&apos;s &amp; Jerry&apos;s&lt;/div&gt;"
        );
    }

    #[test]
    fn test_escape_multibyte() {
        assert_eq!(escape("Crème <brûlée>"), "Crème &lt;brûlée&gt;");
    }

    #[test]
    fn test_escape_to() {
        let mut out = String::from("x");
        escape_to("<test>", &mut out);
        assert_eq!(out, "x&lt;test&gt;");
    }

    #[test]
    fn test_split_cdata() {
        assert_eq!(split_cdata("plain"), ["plain"]);
        assert_eq!(split_cdata("a]]>b"), ["a]]", ">b"]);
        assert_eq!(split_cdata("]]>]]>"), ["]]", ">]]", ">"]);
    }

    #[test]
    fn test_strip_tags_no_markup() {
        let stripped = strip_tags("Zebra Books");
        assert!(matches!(stripped, Cow::Borrowed(_)));
        assert_eq!(stripped, "Zebra Books");
    }

    #[test]
    fn test_strip_tags_removes_elements() {
        assert_eq!(strip_tags("<p>A <b>bold</b> move</p>"), "A bold move");
        assert_eq!(strip_tags("<script>alert(1)</script>ok"), "alert(1)ok");
        assert_eq!(strip_tags("<a href=\"x\">link</a>"), "link");
    }

    #[test]
    fn test_strip_tags_keeps_comparisons() {
        assert_eq!(strip_tags("a < b"), "a < b");
        assert_eq!(strip_tags("5 <"), "5 <");
        assert_eq!(strip_tags("x > y"), "x > y");
    }

    #[test]
    fn test_strip_tags_quoted_attributes() {
        assert_eq!(strip_tags("<a title=\"x>y\">link</a>"), "link");
        assert_eq!(strip_tags("<a title='1>0'>ok</a>"), "ok");
        assert_eq!(strip_tags("Tom's <b>shop</b>"), "Tom's shop");
        assert_eq!(strip_tags("keep<a title=\"open>rest"), "keep");
    }

    #[test]
    fn test_control_chars_are_removed() {
        assert_eq!(strip_tags("a\u{1}b"), "ab");
        assert_eq!(strip_tags("<i>a\u{8}</i>\u{1f}b"), "ab");
        assert_eq!(strip_tags("tab\tand\nnewline\r"), "tab\tand\nnewline\r");
        assert_eq!(escape("a\u{b}<\u{c}"), "a&lt;");
        assert_eq!(strip_control_chars("x\u{0}y\u{e}é"), "xyé");
        assert!(matches!(strip_control_chars("clean"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_tags_unterminated() {
        assert_eq!(strip_tags("before<br"), "before");
    }

    #[test]
    fn test_strip_tags_multibyte() {
        assert_eq!(strip_tags("<i>Café</i> ünïcode"), "Café ünïcode");
    }
}
