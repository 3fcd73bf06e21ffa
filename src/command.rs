//! Insert Header Command
//!
//! Orchestrates one invocation of `sectionHeader.insertHeader`: read the
//! editor state, acquire the label, build the header and hand the edit back
//! to the host. Nothing survives between invocations.

use anyhow::{Context, Result};

use crate::header;
use crate::host::{Document, Editor, Host, InputBoxOptions, Prompt, TextEdit};
use crate::indent;
use crate::style;

/// Identifier the host binds the command to
pub const INSERT_HEADER_COMMAND: &str = "sectionHeader.insertHeader";

pub const PROMPT_PLACEHOLDER: &str = "Enter section header text";
pub const PROMPT_DESCRIPTION: &str = "The text will be centered in the header";

/// Progress of a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Idle,
    SelectionRead,
    TextAcquired,
    HeaderBuilt,
    Applied,
}

/// How the header ended up in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The cursor line was blank and got replaced wholesale
    ReplacedLine,
    /// The header went in at the cursor, surrounding text untouched
    InsertedAtCursor,
}

/// Result of running the command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// No active editor
    NoEditor,
    /// The prompt was dismissed or left empty
    Cancelled,
    Inserted { header: String, placement: Placement },
}

impl CommandOutcome {
    /// Terminal state the invocation reached
    pub fn state(&self) -> CommandState {
        match self {
            CommandOutcome::NoEditor | CommandOutcome::Cancelled => CommandState::Idle,
            CommandOutcome::Inserted { .. } => CommandState::Applied,
        }
    }
}

/// Run the insert-header command against `host`.
///
/// A missing editor and a cancelled prompt are ordinary outcomes. Errors
/// come only from the host failing to read or edit the document, and name
/// the last state the invocation reached.
pub async fn insert_header<H: Host + ?Sized>(host: &mut H) -> Result<CommandOutcome> {
    let mut state = CommandState::Idle;
    let result = run(host, &mut state).await;
    result.with_context(|| format!("{} stopped in state {:?}", INSERT_HEADER_COMMAND, state))
}

async fn run<H: Host + ?Sized>(host: &mut H, state: &mut CommandState) -> Result<CommandOutcome> {
    let (editor, prompt) = host.parts();
    let Some(editor) = editor else {
        log::debug!("{}: no active editor", INSERT_HEADER_COMMAND);
        return Ok(CommandOutcome::NoEditor);
    };

    let selection = editor.selection();
    let language_id = editor.document().language_id().to_string();
    let indentation = indent::detect(
        editor.document(),
        indent::reference_line(&selection),
        &language_id,
    );
    let comment_style = style::resolve(&language_id);
    advance(state, CommandState::SelectionRead);

    let header_text = if !selection.is_empty() {
        let text = editor
            .document()
            .text_in(selection.range())
            .context("Failed to read selected text")?;

        // Deletion must settle before the cursor is read again
        let deleted = editor
            .apply_edit(TextEdit::Delete(selection.range()))
            .await
            .context("Failed to delete selection")?;
        if !deleted {
            log::warn!("Host did not apply the selection deletion");
        }
        text
    } else {
        let answer = prompt
            .input_box(InputBoxOptions {
                placeholder: PROMPT_PLACEHOLDER.to_string(),
                prompt: PROMPT_DESCRIPTION.to_string(),
            })
            .await
            .context("Failed to show input box")?;
        match answer {
            Some(text) if !text.is_empty() => text,
            _ => {
                log::debug!("{}: prompt cancelled", INSERT_HEADER_COMMAND);
                advance(state, CommandState::Idle);
                return Ok(CommandOutcome::Cancelled);
            }
        }
    };
    advance(state, CommandState::TextAcquired);

    let header = header::generate(&header_text, &comment_style, &indentation);
    advance(state, CommandState::HeaderBuilt);

    let placement = place_header(editor, header.clone()).await?;
    advance(state, CommandState::Applied);

    Ok(CommandOutcome::Inserted { header, placement })
}

/// Put `header` at the cursor, replacing the cursor line if it is blank
async fn place_header<E: Editor + ?Sized>(editor: &mut E, header: String) -> Result<Placement> {
    let position = editor.selection().active;
    let line_text = editor
        .document()
        .line_text(position.line)
        .context("Failed to read cursor line")?;

    let (edit, placement) = if line_text.trim().is_empty() {
        let range = editor
            .document()
            .line_range(position.line)
            .context("Failed to read cursor line range")?;
        (TextEdit::Replace(range, header), Placement::ReplacedLine)
    } else {
        (TextEdit::Insert(position, header), Placement::InsertedAtCursor)
    };

    let applied = editor
        .apply_edit(edit)
        .await
        .context("Failed to insert header")?;
    if !applied {
        log::warn!("Host did not apply the header insertion");
    }
    Ok(placement)
}

fn advance(state: &mut CommandState, next: CommandState) {
    log::trace!("{}: {:?} -> {:?}", INSERT_HEADER_COMMAND, state, next);
    *state = next;
}
