//! Completion items offered by the schema registry

use super::template::InsertTemplate;

/// Discriminates what accepting an item starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// A top-level component declaration (`prometheus.scrape "label" { ... }`).
    Component,
    /// A scalar or list attribute (`interval = "1m"`).
    Property,
    /// A nested block (`endpoint { ... }`); its label is a registry identity.
    Block,
}

impl CompletionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Property => "property",
            Self::Block => "block",
        }
    }
}

/// A single suggestion.
///
/// The label is fixed at construction; use [`CompletionItem::new`] and chain
/// `.with_documentation()` / `.with_detail()` for the informational fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    label: String,
    kind: CompletionKind,
    template: InsertTemplate,
    documentation: String,
    detail: String,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionKind, template: InsertTemplate) -> Self {
        Self {
            label: label.into(),
            kind,
            template,
            documentation: String::new(),
            detail: String::new(),
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> CompletionKind {
        self.kind
    }

    pub fn template(&self) -> &InsertTemplate {
        &self.template
    }

    pub fn documentation(&self) -> &str {
        &self.documentation
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}
