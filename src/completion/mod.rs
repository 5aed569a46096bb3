//! Context-aware completion for Alloy configuration files
//!
//! This module provides:
//! - Enclosing-block detection by backward brace pairing ([`context`])
//! - Resolution of the innermost block identity to its registered completions

pub mod context;

pub use context::{enclosing_chain, innermost_block, innermost_block_in_rope};

use ropey::Rope;
use thiserror::Error;
use tracing::debug;

use crate::schema::{CompletionItem, SchemaRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("cursor offset {offset} is outside the document (length {len}) or splits a character")]
    InvalidPosition { offset: usize, len: usize },
}

/// Completions valid at byte `offset` of `text`, in registry order.
///
/// Top level yields the registry's top-level set. Inside a named block the
/// block's own entry is returned, empty when the identity is unknown; parent
/// blocks are never consulted. Braces without a block header in front of them
/// do not change which block is innermost.
pub fn resolve_completions<'r>(
    registry: &'r SchemaRegistry,
    text: &str,
    offset: usize,
) -> Result<&'r [CompletionItem], ResolveError> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return Err(ResolveError::InvalidPosition {
            offset,
            len: text.len(),
        });
    }

    Ok(lookup_innermost(registry, innermost_block(&text[..offset]), offset))
}

/// [`resolve_completions`] over a rope, without copying the text before `offset`.
pub fn resolve_completions_in_rope<'r>(
    registry: &'r SchemaRegistry,
    text: &Rope,
    offset: usize,
) -> Result<&'r [CompletionItem], ResolveError> {
    let len = text.len_bytes();
    let on_boundary = offset <= len && text.char_to_byte(text.byte_to_char(offset)) == offset;
    if !on_boundary {
        return Err(ResolveError::InvalidPosition { offset, len });
    }

    let prefix = text.byte_slice(..offset);
    Ok(lookup_innermost(registry, innermost_block_in_rope(prefix), offset))
}

fn lookup_innermost<'r>(
    registry: &'r SchemaRegistry,
    innermost: Option<String>,
    offset: usize,
) -> &'r [CompletionItem] {
    let items = match innermost {
        None => registry.top_level_items(),
        Some(identity) => {
            let items = registry.lookup(&identity);
            if items.is_empty() {
                debug!("No completions registered for block '{}'", identity);
            }
            items
        }
    };

    debug!("Resolved {} completions at offset {}", items.len(), offset);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CompletionKind, InsertTemplate};

    fn item(label: &str, kind: CompletionKind) -> CompletionItem {
        CompletionItem::new(label, kind, InsertTemplate::literal(label))
    }

    fn fixture() -> SchemaRegistry {
        SchemaRegistry::builder()
            .top_level(item("a", CompletionKind::Component))
            .top_level(item("b", CompletionKind::Component))
            .block(
                "a",
                [
                    item("x", CompletionKind::Property),
                    item("inner", CompletionKind::Block),
                ],
            )
            .block("inner", [item("y", CompletionKind::Property)])
            .build()
            .unwrap()
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(CompletionItem::label).collect()
    }

    #[test]
    fn test_empty_document_is_top_level() {
        let registry = fixture();
        let items = resolve_completions(&registry, "", 0).unwrap();
        assert_eq!(labels(items), vec!["a", "b"]);
    }

    #[test]
    fn test_innermost_block_wins() {
        let registry = fixture();
        let text = "a \"l\" {\n  inner {\n    \n  }\n}\n";
        let offset = text.find("    ").unwrap() + 4;
        let items = resolve_completions(&registry, text, offset).unwrap();
        assert_eq!(labels(items), vec!["y"]);
    }

    #[test]
    fn test_only_text_before_cursor_matters() {
        let registry = fixture();
        let text = "a {\n  \n}\n";
        let items = resolve_completions(&registry, text, 6).unwrap();
        assert_eq!(labels(items), vec!["x", "inner"]);
        let items = resolve_completions(&registry, text, text.len()).unwrap();
        assert_eq!(labels(items), vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_block_yields_nothing() {
        let registry = fixture();
        let text = "a {\n  unknown {\n    ";
        assert!(resolve_completions(&registry, text, text.len()).unwrap().is_empty());
    }

    #[test]
    fn test_object_literal_resolves_to_enclosing_block() {
        let registry = fixture();
        let text = "a {\n  x = {\n    ";
        let items = resolve_completions(&registry, text, text.len()).unwrap();
        assert_eq!(labels(items), vec!["x", "inner"]);
    }

    #[test]
    fn test_headerless_first_line_brace_is_top_level() {
        let registry = fixture();
        let text = "{\n  ";
        let items = resolve_completions(&registry, text, text.len()).unwrap();
        assert_eq!(labels(items), vec!["a", "b"]);
    }

    #[test]
    fn test_rope_resolution_matches_str_resolution() {
        let registry = fixture();
        let text = "a \"l\" {\r\n  inner {\r\n  }\r\n  x = {\r\n    é";
        let rope = Rope::from_str(text);
        for offset in (0..=text.len()).filter(|offset| text.is_char_boundary(*offset)) {
            assert_eq!(
                resolve_completions_in_rope(&registry, &rope, offset),
                resolve_completions(&registry, text, offset),
                "offset {}",
                offset
            );
        }
    }

    #[test]
    fn test_rope_offset_validation() {
        let registry = fixture();
        let rope = Rope::from_str("a { # é");
        let len = rope.len_bytes();
        assert_eq!(
            resolve_completions_in_rope(&registry, &rope, len + 1),
            Err(ResolveError::InvalidPosition { offset: len + 1, len })
        );
        assert!(resolve_completions_in_rope(&registry, &rope, len - 1).is_err());
        assert!(resolve_completions_in_rope(&registry, &rope, len).is_ok());
    }

    #[test]
    fn test_offset_past_end_is_invalid() {
        let registry = fixture();
        assert_eq!(
            resolve_completions(&registry, "a {", 4),
            Err(ResolveError::InvalidPosition { offset: 4, len: 3 })
        );
    }

    #[test]
    fn test_offset_inside_character_is_invalid() {
        let registry = fixture();
        let text = "a { # é";
        let inside = text.len() - 1;
        assert!(matches!(
            resolve_completions(&registry, text, inside),
            Err(ResolveError::InvalidPosition { .. })
        ));
    }
}
