use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use dashmap::DashMap;

use tower_lsp::Client;
use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::{self, InitializeParams, Position, Url};

use tracing::{debug, info, warn};

use crate::completion::resolve_completions_in_rope;
use crate::config::InitializationOptions;
use crate::lsp::convert::{InsertMode, to_lsp_completion_items};
use crate::lsp::models::LspDocument;
use crate::schema::SchemaRegistry;

mod handlers;
mod state;

pub use state::AlloyBackend;

impl AlloyBackend {
    /// Creates a backend serving completions from `registry`.
    pub fn new(client: Client, registry: Arc<SchemaRegistry>) -> Self {
        Self {
            client,
            registry,
            documents_by_uri: Arc::new(DashMap::new()),
            serial_document_id: Arc::new(AtomicU32::new(0)),
            snippet_support: Arc::new(AtomicBool::new(true)),
        }
    }

    fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Returns the open document for `uri`, if any.
    pub fn document(&self, uri: &Url) -> Option<Arc<LspDocument>> {
        self.documents_by_uri.get(uri).map(|entry| entry.value().clone())
    }

    pub fn insert_mode(&self) -> InsertMode {
        InsertMode::from_snippet_support(self.snippet_support.load(Ordering::Relaxed))
    }

    /// Chooses snippet or plain-text insertion from the client's capabilities,
    /// unless `initializationOptions.snippets` overrides it.
    fn configure_insert_mode(&self, params: &InitializeParams) {
        let client_support = params
            .capabilities
            .text_document
            .as_ref()
            .and_then(|text_document| text_document.completion.as_ref())
            .and_then(|completion| completion.completion_item.as_ref())
            .and_then(|item| item.snippet_support)
            .unwrap_or(false);

        let options = match InitializationOptions::from_value(params.initialization_options.clone()) {
            Ok(options) => options,
            Err(e) => {
                warn!("Ignoring malformed initializationOptions: {}", e);
                InitializationOptions::default()
            }
        };

        let enabled = options.snippets.unwrap_or(client_support);
        info!(
            "Completion insert mode: {:?} (client snippet support: {}, override: {:?})",
            InsertMode::from_snippet_support(enabled),
            client_support,
            options.snippets
        );
        self.snippet_support.store(enabled, Ordering::Relaxed);
    }

    /// Resolves completions for `position` in the open document `uri`.
    ///
    /// Returns `Ok(None)` for unknown documents and `invalid_params` for a
    /// position outside the document.
    pub async fn completions_at(
        &self,
        uri: &Url,
        position: Position,
    ) -> jsonrpc::Result<Option<Vec<lsp_types::CompletionItem>>> {
        let Some(document) = self.document(uri) else {
            debug!("Document not found: {}", uri);
            return Ok(None);
        };

        let snapshot = document.snapshot().await;
        let offset = snapshot
            .offset_at(&position)
            .map_err(|e| jsonrpc::Error::invalid_params(e.to_string()))?;
        // Scans the rope backward from the cursor without copying the prefix
        let items = resolve_completions_in_rope(&self.registry, &snapshot.text, offset)
            .map_err(|e| jsonrpc::Error::invalid_params(e.to_string()))?;
        if items.is_empty() {
            debug!(
                "No completions for {} at {}:{} (version {})",
                uri, position.line, position.character, snapshot.version
            );
        }

        Ok(Some(to_lsp_completion_items(items, self.insert_mode())))
    }
}
