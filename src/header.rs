//! Section Header Generation
//!
//! Builds the three-line block: separator, centered label, separator.

use crate::style::CommentStyle;

/// Total visual width of a header line, delimiters included
pub const HEADER_WIDTH: usize = 100;

/// Generate a section header for `text` using the given comment style.
///
/// Every line is prefixed with `indentation` and terminated by `\n`.
/// Widths are counted in characters. Text that does not fit between the
/// delimiters is kept whole: padding clamps to zero and the middle line
/// grows past [`HEADER_WIDTH`].
pub fn generate(text: &str, style: &CommentStyle, indentation: &str) -> String {
    let inner = HEADER_WIDTH.saturating_sub(style.delimiter_width());
    let text_len = text.chars().count();

    let separator = format!("{}{}{}", style.prefix, "-".repeat(inner), style.suffix);

    let left = inner.saturating_sub(text_len) / 2;
    let right = inner.saturating_sub(left + text_len);
    let centered = format!(
        "{}{}{}{}{}",
        style.prefix,
        " ".repeat(left),
        text,
        " ".repeat(right),
        style.suffix
    );

    let mut header = String::with_capacity(3 * (indentation.len() + HEADER_WIDTH + 1) + text.len());
    for line in [&separator, &centered, &separator] {
        header.push_str(indentation);
        header.push_str(line);
        header.push('\n');
    }
    header
}
