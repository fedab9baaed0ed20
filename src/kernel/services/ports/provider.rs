use std::future::Future;
use std::pin::Pin;

use slotmap::new_key_type;

use crate::models::{DocumentSnapshot, Position};

new_key_type! { pub struct ProviderId; }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SuggestKind {
    #[default]
    Text,
    Keyword,
    Function,
    Method,
    Field,
    Variable,
    Module,
    Snippet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestItem {
    pub label: String,
    pub insert_text: String,
    pub kind: SuggestKind,
    pub detail: Option<String>,
    pub filter_text: Option<String>,
    pub sort_text: Option<String>,
    /// Chars before the cursor replaced on accept; defaults to the typed prefix.
    pub overwrite_before: Option<usize>,
    pub overwrite_after: Option<usize>,
}

impl SuggestItem {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: SuggestKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_filter_text(mut self, text: impl Into<String>) -> Self {
        self.filter_text = Some(text.into());
        self
    }

    pub fn with_overwrite(mut self, before: usize, after: usize) -> Self {
        self.overwrite_before = Some(before);
        self.overwrite_after = Some(after);
        self
    }

    pub fn is_snippet(&self) -> bool {
        self.kind == SuggestKind::Snippet
    }

    pub fn filter_key(&self) -> &str {
        self.filter_text.as_deref().unwrap_or(self.label.as_str())
    }
}

/// One provider's answer. `incomplete` means refining the query yields more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSuggestions {
    pub items: Vec<SuggestItem>,
    pub incomplete: bool,
}

impl ProviderSuggestions {
    pub fn complete(items: Vec<SuggestItem>) -> Self {
        Self {
            items,
            incomplete: false,
        }
    }

    pub fn incomplete(items: Vec<SuggestItem>) -> Self {
        Self {
            items,
            incomplete: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request cancelled")]
    Cancelled,
    #[error("provider failed: {0}")]
    Failed(String),
}

pub type ProviderFuture =
    Pin<Box<dyn Future<Output = Result<ProviderSuggestions, ProviderError>> + Send + 'static>>;

pub trait SuggestProvider: Send + Sync {
    fn name(&self) -> &str;

    fn trigger_characters(&self) -> &[char] {
        &[]
    }

    fn applies_to(&self, _language_id: &str) -> bool {
        true
    }

    fn provide(&self, document: &DocumentSnapshot, position: Position) -> ProviderFuture;
}
