//! Host Editor Interface
//!
//! The command never owns an editor. Everything it needs from the
//! surrounding runtime goes through the traits in this module, so the
//! same handler runs against the language server client or an in-memory
//! buffer in tests.

pub mod memory;

use anyhow::Result;

pub use memory::{MemoryEditor, MemoryHost, MemoryPrompt};

/// Zero-based line and character offset.
///
/// Characters are counted in Unicode scalar values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open span between two positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Selection with a fixed anchor and a moving active end (the cursor)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Empty selection sitting at `position`
    pub const fn caret(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    pub fn range(&self) -> Range {
        Range::new(self.start(), self.end())
    }
}

/// A single edit the host applies atomically
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Delete(Range),
    Insert(Position, String),
    Replace(Range, String),
}

impl TextEdit {
    /// Range of existing text the edit overwrites
    pub fn range(&self) -> Range {
        match self {
            TextEdit::Delete(range) | TextEdit::Replace(range, _) => *range,
            TextEdit::Insert(position, _) => Range::new(*position, *position),
        }
    }

    /// Text written in place of [`TextEdit::range`]
    pub fn new_text(&self) -> &str {
        match self {
            TextEdit::Delete(_) => "",
            TextEdit::Insert(_, text) | TextEdit::Replace(_, text) => text,
        }
    }
}

/// Options for the single-line input box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBoxOptions {
    pub placeholder: String,
    pub prompt: String,
}

/// Read access to the document shown in an editor
pub trait Document: Send + Sync {
    fn language_id(&self) -> &str;

    /// Text of a line without its line break
    fn line_text(&self, line: u32) -> Result<String>;

    /// Range covering a line's text, line break excluded
    fn line_range(&self, line: u32) -> Result<Range>;

    fn text_in(&self, range: Range) -> Result<String>;
}

/// The active editor: a document plus the user's selection
#[tower_lsp::async_trait]
pub trait Editor: Send {
    type Document: Document;

    fn document(&self) -> &Self::Document;

    fn selection(&self) -> Selection;

    /// Apply an edit and wait for the host to settle it.
    ///
    /// Returns whether the host reported the edit as applied.
    async fn apply_edit(&mut self, edit: TextEdit) -> Result<bool>;
}

/// Modal text input owned by the host UI
#[tower_lsp::async_trait]
pub trait Prompt: Send + Sync {
    /// Ask the user for a line of text; `None` means the prompt was dismissed
    async fn input_box(&self, options: InputBoxOptions) -> Result<Option<String>>;
}

/// Everything a command invocation can reach in the host runtime
pub trait Host: Send {
    type Editor: Editor;
    type Prompt: Prompt;

    /// The active editor, if any, alongside the prompt service
    fn parts(&mut self) -> (Option<&mut Self::Editor>, &Self::Prompt);
}
