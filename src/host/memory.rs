//! In-Memory Host
//!
//! A plain text buffer standing in for an editor. The language server keeps
//! its document snapshots in sync with the same edit logic.

use std::sync::Mutex;

use anyhow::{Result, bail};

use super::{Document, Editor, Host, InputBoxOptions, Position, Prompt, Range, Selection, TextEdit};

/// Byte offset of `position` within `text`
pub fn offset_at(text: &str, position: Position) -> Result<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        match text[line_start..].find('\n') {
            Some(idx) => line_start += idx + 1,
            None => bail!("line {} is out of range", position.line),
        }
    }

    let line = line_content(&text[line_start..]);
    let character = position.character as usize;
    if let Some((idx, _)) = line.char_indices().nth(character) {
        return Ok(line_start + idx);
    }
    if character == line.chars().count() {
        return Ok(line_start + line.len());
    }
    bail!(
        "character {} is out of range on line {}",
        position.character,
        position.line
    )
}

/// Text of line `line`, without `\n` or `\r\n`
pub fn line_at(text: &str, line: u32) -> Result<&str> {
    match text.split('\n').nth(line as usize) {
        Some(content) => Ok(content.strip_suffix('\r').unwrap_or(content)),
        None => bail!("line {} is out of range", line),
    }
}

/// Range covering line `line`, line break excluded
pub fn line_range(text: &str, line: u32) -> Result<Range> {
    let content = line_at(text, line)?;
    Ok(Range::new(
        Position::new(line, 0),
        Position::new(line, content.chars().count() as u32),
    ))
}

/// Slice of `text` covered by `range`
pub fn text_between(text: &str, range: Range) -> Result<&str> {
    let start = offset_at(text, range.start)?;
    let end = offset_at(text, range.end)?;
    if end < start {
        bail!("range ends before it starts: {:?}", range);
    }
    Ok(&text[start..end])
}

fn line_content(rest: &str) -> &str {
    let end = rest.find('\n').unwrap_or(rest.len());
    let line = &rest[..end];
    line.strip_suffix('\r').unwrap_or(line)
}

/// Position reached after writing `inserted` starting at `start`
fn end_of_insertion(start: Position, inserted: &str) -> Position {
    match inserted.rfind('\n') {
        Some(idx) => Position::new(
            start.line + inserted.matches('\n').count() as u32,
            inserted[idx + 1..].chars().count() as u32,
        ),
        None => Position::new(start.line, start.character + inserted.chars().count() as u32),
    }
}

/// Apply `edit` to `text` in place.
///
/// Returns the position right after the written text, which is where a
/// host leaves the cursor.
pub fn apply_text_edit(text: &mut String, edit: &TextEdit) -> Result<Position> {
    let range = edit.range();
    if range.end < range.start {
        bail!("edit range ends before it starts: {:?}", range);
    }
    let start = offset_at(text, range.start)?;
    let end = offset_at(text, range.end)?;
    text.replace_range(start..end, edit.new_text());
    Ok(end_of_insertion(range.start, edit.new_text()))
}

/// Document backed by an owned string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    pub language_id: String,
    pub text: String,
}

impl Document for MemoryDocument {
    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn line_text(&self, line: u32) -> Result<String> {
        line_at(&self.text, line).map(str::to_string)
    }

    fn line_range(&self, line: u32) -> Result<Range> {
        line_range(&self.text, line)
    }

    fn text_in(&self, range: Range) -> Result<String> {
        text_between(&self.text, range).map(str::to_string)
    }
}

/// How a [`MemoryEditor`] answers edit requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditResponse {
    #[default]
    Apply,
    /// Report the edit as not applied and leave the text alone
    Reject,
    /// Fail the request outright
    Fail,
}

/// Editor over a [`MemoryDocument`] that records every edit it applies
#[derive(Debug, Clone)]
pub struct MemoryEditor {
    pub document: MemoryDocument,
    pub selection: Selection,
    pub applied: Vec<TextEdit>,
    pub response: EditResponse,
}

impl MemoryEditor {
    pub fn new(language_id: &str, text: &str, selection: Selection) -> Self {
        Self {
            document: MemoryDocument {
                language_id: language_id.to_string(),
                text: text.to_string(),
            },
            selection,
            applied: Vec::new(),
            response: EditResponse::Apply,
        }
    }

    pub fn responding(mut self, response: EditResponse) -> Self {
        self.response = response;
        self
    }

    pub fn text(&self) -> &str {
        &self.document.text
    }
}

#[tower_lsp::async_trait]
impl Editor for MemoryEditor {
    type Document = MemoryDocument;

    fn document(&self) -> &MemoryDocument {
        &self.document
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    async fn apply_edit(&mut self, edit: TextEdit) -> Result<bool> {
        match self.response {
            EditResponse::Apply => {}
            EditResponse::Reject => return Ok(false),
            EditResponse::Fail => bail!("editor refused {:?}", edit),
        }
        let cursor = apply_text_edit(&mut self.document.text, &edit)?;
        self.selection = Selection::caret(cursor);
        self.applied.push(edit);
        Ok(true)
    }
}

/// Prompt that returns a scripted answer and remembers what it was asked
#[derive(Debug, Default)]
pub struct MemoryPrompt {
    answer: Option<String>,
    asked: Mutex<Vec<InputBoxOptions>>,
}

impl MemoryPrompt {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            asked: Mutex::default(),
        }
    }

    /// A prompt the user always dismisses
    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn times_asked(&self) -> usize {
        self.asked.lock().map(|asked| asked.len()).unwrap_or_default()
    }

    pub fn last_options(&self) -> Option<InputBoxOptions> {
        self.asked.lock().ok()?.last().cloned()
    }
}

#[tower_lsp::async_trait]
impl Prompt for MemoryPrompt {
    async fn input_box(&self, options: InputBoxOptions) -> Result<Option<String>> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(options);
        }
        Ok(self.answer.clone())
    }
}

/// Host with at most one editor and a scripted prompt
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub editor: Option<MemoryEditor>,
    pub prompt: MemoryPrompt,
}

impl MemoryHost {
    pub fn new(editor: MemoryEditor, prompt: MemoryPrompt) -> Self {
        Self {
            editor: Some(editor),
            prompt,
        }
    }

    /// Host with no document open
    pub fn without_editor(prompt: MemoryPrompt) -> Self {
        Self {
            editor: None,
            prompt,
        }
    }
}

impl Host for MemoryHost {
    type Editor = MemoryEditor;
    type Prompt = MemoryPrompt;

    fn parts(&mut self) -> (Option<&mut MemoryEditor>, &MemoryPrompt) {
        (self.editor.as_mut(), &self.prompt)
    }
}
