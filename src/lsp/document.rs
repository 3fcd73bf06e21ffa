use anyhow::Result;
use tower_lsp::lsp_types::{self, PositionEncodingKind};

use crate::host::memory::{line_at, line_range, text_between};
use crate::host::{Document, Position, Range, Selection};

/// Unit the client counts `character` offsets in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositionEncoding {
    /// LSP default
    #[default]
    Utf16,
    /// One unit per `char`, same as the host positions
    Utf32,
}

impl PositionEncoding {
    /// Pick UTF-32 when the client offers it, otherwise stay on the default
    pub fn negotiate(offered: Option<&[PositionEncodingKind]>) -> Self {
        match offered {
            Some(kinds) if kinds.contains(&PositionEncodingKind::UTF32) => PositionEncoding::Utf32,
            _ => PositionEncoding::Utf16,
        }
    }

    pub fn kind(&self) -> PositionEncodingKind {
        match self {
            PositionEncoding::Utf16 => PositionEncodingKind::UTF16,
            PositionEncoding::Utf32 => PositionEncodingKind::UTF32,
        }
    }
}

/// State for each open document
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    pub language_id: String,
}

impl DocumentState {
    /// Convert a client position into a `char` based one.
    ///
    /// Offsets past the end of the line clamp to its end; an offset inside a
    /// surrogate pair moves past that character.
    pub fn from_lsp_position(
        &self,
        position: lsp_types::Position,
        encoding: PositionEncoding,
    ) -> Position {
        let character = match (encoding, line_at(&self.content, position.line)) {
            (PositionEncoding::Utf16, Ok(text)) => {
                let mut units = 0;
                let mut chars = 0;
                for ch in text.chars() {
                    if units >= position.character {
                        break;
                    }
                    units += ch.len_utf16() as u32;
                    chars += 1;
                }
                chars
            }
            (PositionEncoding::Utf32, Ok(text)) => position.character.min(text.chars().count() as u32),
            // Unknown lines fail later, when the core reads them
            (_, Err(_)) => position.character,
        };
        Position::new(position.line, character)
    }

    /// Convert a `char` based position into the client's encoding
    pub fn to_lsp_position(&self, position: Position, encoding: PositionEncoding) -> lsp_types::Position {
        let character = match (encoding, line_at(&self.content, position.line)) {
            (PositionEncoding::Utf16, Ok(text)) => text
                .chars()
                .take(position.character as usize)
                .map(|ch| ch.len_utf16() as u32)
                .sum(),
            _ => position.character,
        };
        lsp_types::Position::new(position.line, character)
    }

    pub fn to_lsp_range(&self, range: Range, encoding: PositionEncoding) -> lsp_types::Range {
        lsp_types::Range::new(
            self.to_lsp_position(range.start, encoding),
            self.to_lsp_position(range.end, encoding),
        )
    }

    pub fn selection_from_lsp(
        &self,
        anchor: lsp_types::Position,
        active: lsp_types::Position,
        encoding: PositionEncoding,
    ) -> Selection {
        Selection::new(
            self.from_lsp_position(anchor, encoding),
            self.from_lsp_position(active, encoding),
        )
    }
}

impl Document for DocumentState {
    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn line_text(&self, line: u32) -> Result<String> {
        line_at(&self.content, line).map(str::to_string)
    }

    fn line_range(&self, line: u32) -> Result<Range> {
        line_range(&self.content, line)
    }

    fn text_in(&self, range: Range) -> Result<String> {
        text_between(&self.content, range).map(str::to_string)
    }
}
