//! Conversion of schema completion items into protocol types

use tower_lsp::lsp_types::{
    self, CompletionItemKind, CompletionItemLabelDetails, Documentation, InsertTextFormat,
};

use crate::schema::{CompletionItem, CompletionKind};

/// How insertion text is rendered for the connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    Snippet,
    PlainText,
}

impl InsertMode {
    pub fn from_snippet_support(supported: bool) -> Self {
        if supported {
            Self::Snippet
        } else {
            Self::PlainText
        }
    }
}

/// Components and nested blocks insert multi-line templates and are offered as
/// snippets; properties are offered as properties.
pub fn completion_item_kind(kind: CompletionKind) -> CompletionItemKind {
    match kind {
        CompletionKind::Component | CompletionKind::Block => CompletionItemKind::SNIPPET,
        CompletionKind::Property => CompletionItemKind::PROPERTY,
    }
}

/// Converts one item; `position` is its index in the resolved sequence and
/// becomes the sort key so that clients keep registry order. Components and
/// blocks share a protocol kind, so the schema kind is shown next to the label.
pub fn to_lsp_completion_item(
    item: &CompletionItem,
    position: usize,
    mode: InsertMode,
) -> lsp_types::CompletionItem {
    let (insert_text, insert_text_format) = match mode {
        InsertMode::Snippet => (item.template().to_snippet(), InsertTextFormat::SNIPPET),
        InsertMode::PlainText => (item.template().to_plain_text(), InsertTextFormat::PLAIN_TEXT),
    };

    lsp_types::CompletionItem {
        label: item.label().to_string(),
        kind: Some(completion_item_kind(item.kind())),
        label_details: Some(CompletionItemLabelDetails {
            detail: None,
            description: Some(item.kind().as_str().to_string()),
        }),
        detail: (!item.detail().is_empty()).then(|| item.detail().to_string()),
        documentation: (!item.documentation().is_empty())
            .then(|| Documentation::String(item.documentation().to_string())),
        sort_text: Some(format!("{:04}", position)),
        filter_text: Some(item.label().to_string()),
        insert_text: Some(insert_text),
        insert_text_format: Some(insert_text_format),
        ..Default::default()
    }
}

pub fn to_lsp_completion_items(
    items: &[CompletionItem],
    mode: InsertMode,
) -> Vec<lsp_types::CompletionItem> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| to_lsp_completion_item(item, position, mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InsertTemplate;

    fn interval() -> CompletionItem {
        CompletionItem::new(
            "interval",
            CompletionKind::Property,
            InsertTemplate::parse(r#"interval = "${1:1m}""#).unwrap(),
        )
        .with_documentation("How often targets are scraped.")
        .with_detail("duration - optional (default: 1m)")
    }

    #[test]
    fn test_snippet_conversion() {
        let converted = to_lsp_completion_item(&interval(), 3, InsertMode::Snippet);
        assert_eq!(converted.label, "interval");
        assert_eq!(converted.kind, Some(CompletionItemKind::PROPERTY));
        assert_eq!(converted.insert_text.as_deref(), Some(r#"interval = "${1:1m}""#));
        assert_eq!(converted.insert_text_format, Some(InsertTextFormat::SNIPPET));
        assert_eq!(converted.sort_text.as_deref(), Some("0003"));
        assert_eq!(
            converted.detail.as_deref(),
            Some("duration - optional (default: 1m)")
        );
        assert_eq!(
            converted.documentation,
            Some(Documentation::String("How often targets are scraped.".to_string()))
        );
    }

    #[test]
    fn test_plain_text_conversion() {
        let converted = to_lsp_completion_item(&interval(), 0, InsertMode::PlainText);
        assert_eq!(converted.insert_text.as_deref(), Some(r#"interval = "1m""#));
        assert_eq!(converted.insert_text_format, Some(InsertTextFormat::PLAIN_TEXT));
    }

    #[test]
    fn test_empty_metadata_is_omitted() {
        let bare = CompletionItem::new("x", CompletionKind::Block, InsertTemplate::literal("x {}"));
        let converted = to_lsp_completion_item(&bare, 0, InsertMode::Snippet);
        assert_eq!(converted.kind, Some(CompletionItemKind::SNIPPET));
        assert!(converted.detail.is_none());
        assert!(converted.documentation.is_none());
    }

    #[test]
    fn test_label_details_name_the_schema_kind() {
        let component = CompletionItem::new(
            "loki.write",
            CompletionKind::Component,
            InsertTemplate::literal("loki.write \"default\" {}"),
        );
        let block = CompletionItem::new("endpoint", CompletionKind::Block, InsertTemplate::literal("endpoint {}"));
        let descriptions: Vec<_> = to_lsp_completion_items(&[component, block, interval()], InsertMode::Snippet)
            .into_iter()
            .map(|converted| converted.label_details.and_then(|details| details.description))
            .collect();
        assert_eq!(
            descriptions,
            vec![
                Some("component".to_string()),
                Some("block".to_string()),
                Some("property".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_text_preserves_order() {
        let items = vec![interval(), interval().with_detail("second")];
        let converted = to_lsp_completion_items(&items, InsertMode::Snippet);
        let sort_keys: Vec<_> = converted.iter().map(|c| c.sort_text.clone().unwrap()).collect();
        assert_eq!(sort_keys, vec!["0000", "0001"]);
    }
}
