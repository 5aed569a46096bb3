use ropey::{Rope, RopeSlice};

use thiserror::Error;

use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

pub use crate::lsp::models::{DocumentSnapshot, LspDocument, LspDocumentState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("version {version} is not newer than {current}")]
    StaleVersion { version: i32, current: i32 },

    #[error("position {line}:{character} is outside the document")]
    InvalidPosition { line: u32, character: u32 },
}

/// Number of chars in `line` excluding its terminator (`\n`, `\r\n` or `\r`).
fn line_content_chars(line: RopeSlice) -> usize {
    let mut len = line.len_chars();
    if len > 0 && line.char(len - 1) == '\n' {
        len -= 1;
    }
    if len > 0 && line.char(len - 1) == '\r' {
        len -= 1;
    }
    len
}

/// Converts an LSP position (UTF-16 code units) to a char index in the Rope.
///
/// A character past the end of its line clamps to the line end; a line past
/// the end of the document is an error.
fn position_to_char(position: &Position, text: &Rope) -> Result<usize, DocumentError> {
    let line = position.line as usize;
    if line >= text.len_lines() {
        return Err(DocumentError::InvalidPosition {
            line: position.line,
            character: position.character,
        });
    }
    let line_slice = text.line(line);
    let content_utf16 = line_slice.char_to_utf16_cu(line_content_chars(line_slice));
    let utf16 = (position.character as usize).min(content_utf16);
    Ok(text.line_to_char(line) + line_slice.utf16_cu_to_char(utf16))
}

/// Converts an LSP position to a byte offset in the Rope.
fn position_to_byte_offset(position: &Position, text: &Rope) -> Result<usize, DocumentError> {
    let char_idx = position_to_char(position, text)?;
    Ok(text.char_to_byte(char_idx))
}

impl DocumentSnapshot {
    /// Byte offset of `position` in this snapshot's text.
    pub fn offset_at(&self, position: &Position) -> Result<usize, DocumentError> {
        position_to_byte_offset(position, &self.text)
    }
}

impl LspDocumentState {
    /// Applies a list of content changes to the document state.
    ///
    /// Changes are applied in order to a copy of the text, which only replaces
    /// the current text once every change has been applied.
    pub fn apply(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<(), DocumentError> {
        if version <= self.version {
            return Err(DocumentError::StaleVersion {
                version,
                current: self.version,
            });
        }
        let mut text = self.text.clone();
        for change in &changes {
            if let Some(range) = change.range {
                let start = position_to_char(&range.start, &text)?;
                let end = position_to_char(&range.end, &text)?;
                let (start, end) = (start.min(end), start.max(end));
                text.remove(start..end);
                text.insert(start, &change.text);
            } else {
                text = Rope::from_str(&change.text);
            }
        }
        self.text = text;
        self.version = version;
        Ok(())
    }
}

impl LspDocument {
    pub fn new(id: u32, uri: Url, text: &str, version: i32) -> Self {
        Self {
            id,
            state: tokio::sync::RwLock::new(LspDocumentState {
                uri,
                text: Rope::from_str(text),
                version,
            }),
        }
    }

    /// Returns the URI of the document.
    pub async fn uri(&self) -> Url {
        self.state.read().await.uri.clone()
    }

    /// Returns the current text of the document as a string.
    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    /// Returns the current version of the document.
    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    /// Returns the number of lines in the document.
    pub async fn num_lines(&self) -> usize {
        self.state.read().await.text.len_lines()
    }

    /// Returns text and version as one consistent view.
    pub async fn snapshot(&self) -> DocumentSnapshot {
        let state = self.state.read().await;
        DocumentSnapshot {
            text: state.text.clone(),
            version: state.version,
        }
    }

    /// Applies changes to the document.
    pub async fn apply(
        &self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<(), DocumentError> {
        let mut state = self.state.write().await;
        state.apply(changes, version)
    }
}
