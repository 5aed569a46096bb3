use ropey::Rope;

use tower_lsp::lsp_types::Url;

/// State for an open text document managed by the LSP server.
#[derive(Debug)]
pub struct LspDocumentState {
    pub uri: Url,
    pub text: Rope,
    pub version: i32,
}

/// LSP document with state for open files.
#[derive(Debug)]
pub struct LspDocument {
    pub id: u32,
    pub state: tokio::sync::RwLock<LspDocumentState>,
}

/// Text and version of a document captured under a single read lock.
///
/// Cloning a `Rope` is cheap, so a snapshot never holds the document lock
/// while a request is being served.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub text: Rope,
    pub version: i32,
}
