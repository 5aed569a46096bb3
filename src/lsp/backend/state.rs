//! Backend state management
//!
//! This module defines the AlloyBackend struct, which holds the open documents,
//! the shared schema registry and the insertion mode negotiated with the client.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32};

use dashmap::DashMap;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

use crate::lsp::models::LspDocument;
use crate::schema::SchemaRegistry;

/// The Alloy language server backend, managing state and handling LSP requests.
#[derive(Clone)]
pub struct AlloyBackend {
    pub(super) client: Client,
    /// Read-only after startup; shared by every request
    pub(super) registry: Arc<SchemaRegistry>,
    pub(super) documents_by_uri: Arc<DashMap<Url, Arc<LspDocument>>>,
    pub(super) serial_document_id: Arc<AtomicU32>,
    /// Whether completions are sent as snippets; settled during `initialize`
    pub(super) snippet_support: Arc<AtomicBool>,
}

// Manual Debug implementation to keep the client handle out of log output
impl std::fmt::Debug for AlloyBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyBackend")
            .field("block_identities", &self.registry.len())
            .field("documents_count", &self.documents_by_uri.len())
            .finish()
    }
}
