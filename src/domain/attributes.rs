//! Attribute-level editing of flat XML documents.
//!
//! The POS configuration files keep every setting as an attribute on a single
//! element, so edits are done on the raw text: the rest of the document
//! (comments, ordering, line breaks) is preserved byte for byte.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn attribute_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"(^|\s)([A-Za-z_][A-Za-z0-9_.:-]*)="([^"]*)""#).unwrap())
}

/// Read the first value of `key`, unescaped.
pub fn read_attribute(content: &str, key: &str) -> Option<String> {
    attribute_regex()
        .captures_iter(content)
        .find(|captures| &captures[2] == key)
        .map(|captures| unescape_value(&captures[3]))
}

/// Whether `key` appears as an attribute anywhere in `content`.
pub fn has_attribute(content: &str, key: &str) -> bool {
    attribute_regex()
        .captures_iter(content)
        .any(|captures| &captures[2] == key)
}

/// Replace every occurrence of `key`. Returns `None` when the key is absent.
pub fn replace_attribute(content: &str, key: &str, value: &str) -> Option<String> {
    let escaped = escape_value(value);
    let mut replacements = 0usize;

    let rewritten = attribute_regex().replace_all(content, |captures: &Captures<'_>| {
        if &captures[2] == key {
            replacements += 1;
            format!("{}{}=\"{}\"", &captures[1], key, escaped)
        } else {
            captures[0].to_string()
        }
    });

    if replacements == 0 {
        None
    } else {
        Some(rewritten.into_owned())
    }
}

/// Insert `key="value"` as the first attribute of `<element`.
/// Returns `None` when the element does not appear in `content`.
pub fn insert_attribute(content: &str, element: &str, key: &str, value: &str) -> Option<String> {
    let start = find_element(content, element)?;
    let insert_at = start + element.len() + 1;

    let mut rewritten = String::with_capacity(content.len() + key.len() + value.len() + 4);
    rewritten.push_str(&content[..insert_at]);
    rewritten.push_str(&format!(" {}=\"{}\"", key, escape_value(value)));
    rewritten.push_str(&content[insert_at..]);
    Some(rewritten)
}

/// Replace `key` if present, otherwise insert it on `<element`.
pub fn set_attribute(content: &str, element: &str, key: &str, value: &str) -> Option<String> {
    replace_attribute(content, key, value).or_else(|| insert_attribute(content, element, key, value))
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Reverse of [`escape_value`]; `&amp;` is decoded last.
pub fn unescape_value(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn find_element(content: &str, element: &str) -> Option<usize> {
    let needle = format!("<{}", element);
    content.match_indices(&needle).map(|(idx, _)| idx).find(|idx| {
        matches!(
            content[idx + needle.len()..].chars().next(),
            Some(' ' | '\t' | '\r' | '\n' | '/' | '>')
        )
    })
}
