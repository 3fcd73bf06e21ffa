//! Indentation Detection
//!
//! Only whitespace-sensitive languages get their header indented to match
//! the surrounding block. Everything else starts at column zero.

use regex::Regex;

use crate::host::{Document, Selection};

/// Language whose headers follow the reference line's indentation
pub const INDENT_SENSITIVE_LANGUAGE: &str = "python";

/// Line whose indentation the header should copy
pub fn reference_line(selection: &Selection) -> u32 {
    if selection.is_empty() {
        selection.active.line
    } else {
        selection.start().line
    }
}

/// Leading whitespace of `line`, or an empty string.
///
/// Returns empty without reading the document unless `language_id` is
/// [`INDENT_SENSITIVE_LANGUAGE`]. Read failures are logged and treated as
/// no indentation.
pub fn detect<D: Document + ?Sized>(document: &D, line: u32, language_id: &str) -> String {
    if language_id != INDENT_SENSITIVE_LANGUAGE {
        return String::new();
    }

    match document.line_text(line) {
        Ok(text) => leading_whitespace(&text).unwrap_or_default(),
        Err(e) => {
            log::warn!("Error determining indentation on line {}: {:#}", line, e);
            String::new()
        }
    }
}

fn leading_whitespace(text: &str) -> Option<String> {
    let indent_re = Regex::new(r"^(\s+)").ok()?;
    let captures = indent_re.captures(text)?;
    Some(captures.get(1)?.as_str().to_string())
}
