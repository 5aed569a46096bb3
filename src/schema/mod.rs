//! Schema registry for Alloy configuration blocks
//!
//! Maps a block identity (a component type such as `prometheus.scrape` or a
//! nested keyword such as `endpoint`) to the ordered completions accepted
//! directly inside that block, plus one separate set offered at top level.
//!
//! The registry is built once, never mutated, and shared as
//! `Arc<SchemaRegistry>` between request handlers.

mod catalog;
pub mod item;
pub mod template;

use std::collections::HashSet;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

pub use item::{CompletionItem, CompletionKind};
pub use template::{InsertTemplate, Placeholder, PlaceholderKind, Segment, TemplateError};

/// Name used for the top-level set in errors and reports.
pub const TOP_LEVEL: &str = "<top level>";

/// Configuration defects detected while building a registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("completion item in '{identity}' has an empty label")]
    EmptyLabel { identity: String },

    #[error("label '{label}' appears more than once in '{identity}'")]
    DuplicateLabel { identity: String, label: String },

    #[error("block identity '{identity}' is registered more than once")]
    DuplicateBlock { identity: String },

    #[error("invalid insertion template for '{label}' in '{identity}'")]
    InvalidTemplate {
        identity: String,
        label: String,
        #[source]
        source: TemplateError,
    },
}

/// A `Block` item whose label has no registry entry of its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DanglingReference {
    /// Identity of the set containing the item ([`TOP_LEVEL`] for the top-level set).
    pub parent: String,
    pub label: String,
}

/// Immutable mapping from block identity to completion items.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    blocks: FxHashMap<String, Vec<CompletionItem>>,
    top_level: Vec<CompletionItem>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Builds the registry from the compiled-in Alloy catalog.
    pub fn builtin() -> Result<Self, SchemaError> {
        catalog::builtin_registry()
    }

    /// Completions valid directly inside `identity`, in presentation order.
    ///
    /// Unknown identities yield an empty slice; matching is exact.
    pub fn lookup(&self, identity: &str) -> &[CompletionItem] {
        self.blocks
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Component-starting completions offered outside any block.
    pub fn top_level_items(&self) -> &[CompletionItem] {
        &self.top_level
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.blocks.contains_key(identity)
    }

    /// Registered block identities in no particular order.
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Number of registered block identities.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.top_level.is_empty()
    }

    /// Lists every `Block` item that points at an identity with no entry.
    ///
    /// Sorted by parent then label so reports are stable.
    pub fn unregistered_block_references(&self) -> Vec<DanglingReference> {
        let top_level = std::iter::once((TOP_LEVEL, self.top_level.as_slice()));
        let nested = self
            .blocks
            .iter()
            .map(|(identity, items)| (identity.as_str(), items.as_slice()));

        let mut dangling: Vec<DanglingReference> = top_level
            .chain(nested)
            .flat_map(|(parent, items)| {
                items
                    .iter()
                    .filter(|item| item.kind() == CompletionKind::Block)
                    .filter(|item| !self.contains(item.label()))
                    .map(move |item| DanglingReference {
                        parent: parent.to_string(),
                        label: item.label().to_string(),
                    })
            })
            .collect();
        dangling.sort();
        dangling
    }
}

/// Collects top-level and per-block completion sets before validation.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    blocks: Vec<(String, Vec<CompletionItem>)>,
    top_level: Vec<CompletionItem>,
}

impl SchemaRegistryBuilder {
    pub fn top_level(mut self, item: CompletionItem) -> Self {
        self.top_level.push(item);
        self
    }

    pub fn top_level_items(mut self, items: impl IntoIterator<Item = CompletionItem>) -> Self {
        self.top_level.extend(items);
        self
    }

    /// Registers the completions valid directly inside `identity`.
    pub fn block(
        mut self,
        identity: impl Into<String>,
        items: impl IntoIterator<Item = CompletionItem>,
    ) -> Self {
        self.blocks
            .push((identity.into(), items.into_iter().collect()));
        self
    }

    /// Validates labels and identities and freezes the registry.
    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        validate_set(TOP_LEVEL, &self.top_level)?;

        let mut blocks = FxHashMap::default();
        for (identity, items) in self.blocks {
            validate_set(&identity, &items)?;
            if blocks.contains_key(&identity) {
                return Err(SchemaError::DuplicateBlock { identity });
            }
            blocks.insert(identity, items);
        }

        debug!(
            "Built schema registry with {} block identities and {} top-level items",
            blocks.len(),
            self.top_level.len()
        );

        Ok(SchemaRegistry {
            blocks,
            top_level: self.top_level,
        })
    }
}

fn validate_set(identity: &str, items: &[CompletionItem]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for item in items {
        if item.label().is_empty() {
            return Err(SchemaError::EmptyLabel {
                identity: identity.to_string(),
            });
        }
        if !seen.insert(item.label()) {
            return Err(SchemaError::DuplicateLabel {
                identity: identity.to_string(),
                label: item.label().to_string(),
            });
        }
    }
    Ok(())
}
