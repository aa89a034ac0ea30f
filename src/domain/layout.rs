//! Receipt header stored in `layout.xml`.
//!
//! The header block holds `<value>` lines; the first three centered ones are
//! the merchant name, the street address and the city line.

use crate::domain::attributes::{read_attribute, set_attribute};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Province printed on the third header line.
pub const PROVINCE: &str = "QUEBEC";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("no <Header> element found in layout.xml")]
    MissingHeader,

    #[error("not enough centered <value> lines in the header (found {found}, need 3)")]
    NotEnoughLines { found: usize },
}

fn value_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"<value[\s/][^>]*>|<value>").unwrap())
}

/// The three header lines, already upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLines {
    pub name: String,
    pub street: String,
    pub city: String,
}

impl HeaderLines {
    pub fn new(
        commerce_name: &str,
        address_num: &str,
        address_street: &str,
        city: &str,
        postal_code: &str,
    ) -> Self {
        HeaderLines {
            name: commerce_name.trim().to_uppercase(),
            street: format!("{} {}", address_num.trim(), address_street.trim())
                .trim()
                .to_uppercase(),
            city: format!("{}, {}, {}", city.trim(), PROVINCE, postal_code.trim()).to_uppercase(),
        }
    }

    pub fn as_array(&self) -> [&str; 3] {
        [self.name.as_str(), self.street.as_str(), self.city.as_str()]
    }
}

/// Rewrite the `text` attribute of the first three centered header values.
pub fn patch_header(content: &str, lines: &HeaderLines) -> Result<String, LayoutError> {
    let (start, end) = header_span(content).ok_or(LayoutError::MissingHeader)?;
    let header = &content[start..end];

    let centered: Vec<_> = value_tag_regex()
        .find_iter(header)
        .filter(|m| read_attribute(m.as_str(), "center").as_deref() == Some("True"))
        .take(3)
        .collect();

    if centered.len() < 3 {
        return Err(LayoutError::NotEnoughLines {
            found: centered.len(),
        });
    }

    let mut patched = String::with_capacity(content.len());
    patched.push_str(&content[..start]);

    let mut cursor = 0usize;
    for (tag, line) in centered.iter().zip(lines.as_array()) {
        patched.push_str(&header[cursor..tag.start()]);
        let rewritten = set_attribute(tag.as_str(), "value", "text", line)
            .unwrap_or_else(|| tag.as_str().to_string());
        patched.push_str(&rewritten);
        cursor = tag.end();
    }
    patched.push_str(&header[cursor..]);
    patched.push_str(&content[end..]);

    Ok(patched)
}

/// Byte range of the `<Header>` element, from its start tag to the end of
/// `</Header>`.
fn header_span(content: &str) -> Option<(usize, usize)> {
    let start = content.match_indices("<Header").map(|(i, _)| i).find(|i| {
        matches!(
            content[i + "<Header".len()..].chars().next(),
            Some(' ' | '\t' | '\r' | '\n' | '>')
        )
    })?;
    let close = content[start..].find("</Header>")?;
    Some((start, start + close + "</Header>".len()))
}
