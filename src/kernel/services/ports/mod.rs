//! Service ports: traits + data contracts.

pub mod config;
pub mod editor;
pub mod provider;
pub mod runtime;
pub mod widget;

pub use config::{SnippetMode, SuggestConfig, MIN_QUICK_SUGGESTIONS_DELAY_MS};
pub use editor::{CursorChange, CursorChangeReason, CursorChangeSource, EditorEvent, EditorHost};
pub use provider::{
    ProviderError, ProviderFuture, ProviderId, ProviderSuggestions, SuggestItem, SuggestKind,
    SuggestProvider,
};
pub use runtime::{AsyncExecutor, BoxFuture};
pub use widget::{FocusedItem, SuggestFilter, SuggestInsertion, SuggestWidget};
