//! Comment Style Resolution
//!
//! Maps a host language identifier to the comment delimiters used to frame
//! a section header. The mapping is a static table with an explicit default.

/// Prefix/suffix pair that turns a line into a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl CommentStyle {
    pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    /// Width taken by both delimiters, in characters
    pub fn delimiter_width(&self) -> usize {
        self.prefix.chars().count() + self.suffix.chars().count()
    }
}

impl Default for CommentStyle {
    fn default() -> Self {
        DEFAULT_STYLE
    }
}

const SLASHES: CommentStyle = CommentStyle::new("// ", " //");
const MARKUP: CommentStyle = CommentStyle::new("<!-- ", " -->");
const BLOCK: CommentStyle = CommentStyle::new("/* ", " */");
const HASH: CommentStyle = CommentStyle::new("# ", " #");

/// Style used for identifiers missing from the table
pub const DEFAULT_STYLE: CommentStyle = HASH;

/// Language identifier to comment style
static COMMENT_STYLES: &[(&str, CommentStyle)] = &[
    // C family
    ("javascript", SLASHES),
    ("typescript", SLASHES),
    ("javascriptreact", SLASHES),
    ("typescriptreact", SLASHES),
    ("java", SLASHES),
    ("c", SLASHES),
    ("cpp", SLASHES),
    ("csharp", SLASHES),
    ("php", SLASHES),
    // Markup
    ("html", MARKUP),
    ("xml", MARKUP),
    ("svg", MARKUP),
    // Stylesheets
    ("css", BLOCK),
    ("scss", BLOCK),
    ("less", BLOCK),
    // Scripts and config
    ("python", HASH),
    ("yaml", HASH),
    ("shellscript", HASH),
    ("ruby", HASH),
    ("dockerfile", HASH),
];

/// Resolve the comment style for a language identifier.
///
/// Never fails: unknown identifiers fall back to [`DEFAULT_STYLE`].
pub fn resolve(language_id: &str) -> CommentStyle {
    COMMENT_STYLES
        .iter()
        .find(|(id, _)| *id == language_id)
        .map(|(_, style)| *style)
        .unwrap_or_else(|| {
            log::debug!("No comment style for '{}', using default", language_id);
            DEFAULT_STYLE
        })
}

/// List all language identifiers with an explicit table entry
pub fn supported_languages() -> Vec<&'static str> {
    COMMENT_STYLES.iter().map(|(id, _)| *id).collect()
}
