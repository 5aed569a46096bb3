//! LSP protocol handler implementations
//!
//! This module contains the `tower_lsp::LanguageServer` trait implementation
//! for the Alloy backend:
//! - Lifecycle handlers (initialize, initialized, shutdown)
//! - Document lifecycle (did_open, did_change, did_save, did_close)
//! - Completion

use std::sync::Arc;

use tower_lsp::{LanguageServer, jsonrpc};
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DidSaveTextDocumentParams,
    InitializeParams, InitializeResult, InitializedParams, MessageType, ServerCapabilities,
    ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
};

use tracing::{debug, info, warn};

use super::state::AlloyBackend;
use crate::lsp::models::LspDocument;

/// Characters after which clients should ask for completions.
pub const TRIGGER_CHARACTERS: [&str; 5] = [".", "{", "=", " ", "\n"];

#[tower_lsp::async_trait]
impl LanguageServer for AlloyBackend {
    /// Handles the LSP initialize request, advertising incremental sync and completions.
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize: {:?}", params);

        self.configure_insert_mode(&params);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(
                        TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect(),
                    ),
                    all_commit_characters: None,
                    resolve_provider: Some(false),
                    completion_item: None,
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    /// Handles the LSP initialized notification.
    async fn initialized(&self, params: InitializedParams) {
        info!("Initialized: {:?}", params);
        self.client
            .log_message(MessageType::INFO, "Alloy language server initialized")
            .await;
    }

    /// Handles the LSP shutdown request.
    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        Ok(())
    }

    /// Handles opening a text document, replacing any previous copy of it.
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        info!(
            "Opening document: URI={}, version={}",
            params.text_document.uri, params.text_document.version
        );
        let uri = params.text_document.uri;
        let document_id = self.next_document_id();
        let document = Arc::new(LspDocument::new(
            document_id,
            uri.clone(),
            &params.text_document.text,
            params.text_document.version,
        ));
        debug!(
            "Created document {} with {} lines for URI {}",
            document_id,
            document.num_lines().await,
            uri
        );
        self.documents_by_uri.insert(uri, document);
    }

    /// Handles changes to a text document, applying incremental updates.
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        info!(
            "textDocument/didChange: URI={}, version={}",
            params.text_document.uri, params.text_document.version
        );
        debug!("textDocument/didChange: {:?}", params);
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        match self.document(&uri) {
            Some(document) => {
                if let Err(e) = document.apply(params.content_changes, version).await {
                    warn!("Failed to apply changes to document with URI={}: {}", uri, e);
                }
            }
            None => warn!("Failed to find document with URI={}", uri),
        }
    }

    /// Handles saving a text document (no-op since the store tracks every change).
    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        info!("textDocument/didSave: {:?}", params);
    }

    /// Handles closing a text document, removing it from state.
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        info!("textDocument/didClose: {:?}", params);
        let uri = params.text_document.uri;
        // DashMap::remove returns Option<(K, V)>
        if let Some((_key, document)) = self.documents_by_uri.remove(&uri) {
            info!("Closed document: {}, id: {}", uri, document.id);
        } else {
            warn!("Failed to find document with URI={}", uri);
        }
    }

    /// Offers the completions registered for the block enclosing the cursor.
    async fn completion(&self, params: CompletionParams) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        debug!("Completion request at {}:{:?}", uri, position);

        let items = self.completions_at(&uri, position).await?;
        if let Some(items) = &items {
            debug!("Returning {} completions for {}", items.len(), uri);
        }
        Ok(items.map(CompletionResponse::Array))
    }
}
