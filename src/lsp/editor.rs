//! Host adapter over a language server client.
//!
//! The client owns the real buffer. Edits travel as `workspace/applyEdit`
//! requests and are mirrored into a local snapshot once the client reports
//! them applied, so cursor geometry can be re-read without waiting for the
//! next `didChange`.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tower_lsp::Client;
use tower_lsp::lsp_types::{self, Url, WorkspaceEdit};

use crate::host::memory::apply_text_edit;
use crate::host::{Editor, Host, InputBoxOptions, Prompt, Selection, TextEdit};
use crate::lsp::document::{DocumentState, PositionEncoding};

/// Selection as sent by the client
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SelectionArg {
    pub anchor: lsp_types::Position,
    pub active: lsp_types::Position,
}

/// Argument object of `sectionHeader.insertHeader`.
///
/// `text` carries the answer of the client-side input box; a missing or
/// null value means the user dismissed it.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertHeaderArgs {
    pub uri: Url,
    pub selection: SelectionArg,
    #[serde(default)]
    pub text: Option<String>,
}

/// Editor view of one client document
pub struct LspEditor {
    client: Client,
    uri: Url,
    document: DocumentState,
    selection: Selection,
    encoding: PositionEncoding,
}

impl LspEditor {
    /// Editor over `document` with the selection the client sent
    pub fn new(
        client: Client,
        uri: Url,
        document: DocumentState,
        selection: SelectionArg,
        encoding: PositionEncoding,
    ) -> Self {
        let selection = document.selection_from_lsp(selection.anchor, selection.active, encoding);
        Self {
            client,
            uri,
            document,
            selection,
            encoding,
        }
    }

    /// The edit as the client expects it, positions in its encoding
    fn to_lsp_edit(&self, edit: &TextEdit) -> lsp_types::TextEdit {
        lsp_types::TextEdit::new(
            self.document.to_lsp_range(edit.range(), self.encoding),
            edit.new_text().to_string(),
        )
    }
}

#[tower_lsp::async_trait]
impl Editor for LspEditor {
    type Document = DocumentState;

    fn document(&self) -> &DocumentState {
        &self.document
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    async fn apply_edit(&mut self, edit: TextEdit) -> Result<bool> {
        // Convert against the snapshot the edit was computed on
        let lsp_edit = self.to_lsp_edit(&edit);
        let changes = HashMap::from([(self.uri.clone(), vec![lsp_edit])]);
        let response = self
            .client
            .apply_edit(WorkspaceEdit::new(changes))
            .await
            .map_err(|e| anyhow!("workspace/applyEdit failed: {}", e))?;

        if !response.applied {
            log::warn!(
                "Client rejected edit on {}: {}",
                self.uri,
                response.failure_reason.as_deref().unwrap_or("no reason given")
            );
            return Ok(false);
        }

        let cursor = apply_text_edit(&mut self.document.content, &edit)
            .with_context(|| format!("Edit does not fit snapshot of {}", self.uri))?;
        self.selection = Selection::caret(cursor);
        Ok(true)
    }
}

/// Input box answered ahead of time by the client
#[derive(Debug, Clone, Default)]
pub struct LspPrompt {
    answer: Option<String>,
}

impl LspPrompt {
    pub fn new(answer: Option<String>) -> Self {
        Self { answer }
    }
}

#[tower_lsp::async_trait]
impl Prompt for LspPrompt {
    async fn input_box(&self, options: InputBoxOptions) -> Result<Option<String>> {
        log::debug!("Input box '{}' answered by client", options.placeholder);
        Ok(self.answer.clone())
    }
}

/// Host made of the document named in the command arguments
pub struct LspHost {
    pub editor: Option<LspEditor>,
    pub prompt: LspPrompt,
}

impl Host for LspHost {
    type Editor = LspEditor;
    type Prompt = LspPrompt;

    fn parts(&mut self) -> (Option<&mut LspEditor>, &LspPrompt) {
        (self.editor.as_mut(), &self.prompt)
    }
}
