use serde_json::Value;
use tower_lsp::jsonrpc::{Error as LspError, Result as LspResult};
use tower_lsp::lsp_types::*;

use crate::command::{CommandOutcome, INSERT_HEADER_COMMAND, insert_header};
use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::lsp::editor::{InsertHeaderArgs, LspEditor, LspHost, LspPrompt};

/// Trait for handling `workspace/executeCommand`
#[tower_lsp::async_trait]
pub trait HandleExecuteCommand {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<Value>>;
}

/// Trait for keeping document snapshots in sync with the client
#[tower_lsp::async_trait]
pub trait HandleDocumentSync {
    async fn handle_did_open(&self, params: DidOpenTextDocumentParams);
    async fn handle_did_change(&self, params: DidChangeTextDocumentParams);
    async fn handle_did_close(&self, params: DidCloseTextDocumentParams);
}

/// Pull the single argument object out of the command parameters
pub fn parse_insert_header_args(arguments: Vec<Value>) -> LspResult<InsertHeaderArgs> {
    let argument = arguments
        .into_iter()
        .next()
        .ok_or_else(|| LspError::invalid_params("missing insert header arguments"))?;
    serde_json::from_value(argument)
        .map_err(|e| LspError::invalid_params(format!("invalid insert header arguments: {}", e)))
}

#[tower_lsp::async_trait]
impl HandleExecuteCommand for Backend {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<Value>> {
        if params.command != INSERT_HEADER_COMMAND {
            return Err(LspError::invalid_params(format!(
                "unknown command: {}",
                params.command
            )));
        }
        let args = parse_insert_header_args(params.arguments)?;

        // Snapshot under the lock, then release it before talking to the client
        let snapshot = self.documents.lock().await.get(&args.uri).cloned();
        let editor = snapshot.map(|document| {
            LspEditor::new(
                self.client.clone(),
                args.uri.clone(),
                document,
                args.selection,
                self.position_encoding(),
            )
        });
        let mut host = LspHost {
            editor,
            prompt: LspPrompt::new(args.text),
        };

        match insert_header(&mut host).await {
            Ok(CommandOutcome::Inserted { placement, .. }) => {
                log::info!("Inserted section header in {} ({:?})", args.uri, placement);
                Ok(None)
            }
            Ok(outcome) => {
                log::debug!("{} finished without edit: {:?}", INSERT_HEADER_COMMAND, outcome);
                Ok(None)
            }
            Err(e) => {
                let message = format!("Failed to insert section header: {:#}", e);
                log::error!("{}", message);
                self.client
                    .show_message(MessageType::ERROR, message.clone())
                    .await;
                let mut error = LspError::internal_error();
                error.message = message.into();
                Err(error)
            }
        }
    }
}

#[tower_lsp::async_trait]
impl HandleDocumentSync for Backend {
    async fn handle_did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        let doc_state = DocumentState {
            content: item.text,
            language_id: item.language_id,
        };

        let mut docs = self.documents.lock().await;
        docs.insert(item.uri, doc_state);
    }

    async fn handle_did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the last change carries the whole document
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut docs = self.documents.lock().await;
            match docs.get_mut(&uri) {
                Some(doc_state) => doc_state.content = change.text,
                None => log::warn!("didChange for unopened document {}", uri),
            }
        }
    }

    async fn handle_did_close(&self, params: DidCloseTextDocumentParams) {
        let mut docs = self.documents.lock().await;
        docs.remove(&params.text_document.uri);
    }
}
