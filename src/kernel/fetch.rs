//! Asynchronous suggestion fetch across a set of providers.

use std::future::Future;
use std::pin::Pin;

use crate::kernel::provider_registry::ProviderHandle;
use crate::kernel::services::ports::{ProviderError, SnippetMode, SuggestItem};
use crate::models::{DocumentSnapshot, Position};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestResult {
    pub items: Vec<SuggestItem>,
    pub incomplete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("suggestion fetch cancelled")]
    Cancelled,
    #[error("all {count} providers failed, last error: {last}")]
    AllProvidersFailed { count: usize, last: ProviderError },
}

pub type FetchFuture =
    Pin<Box<dyn Future<Output = Result<SuggestResult, FetchError>> + Send + 'static>>;

/// Asks `providers` in order and merges their answers.
///
/// Provider requests are issued immediately; awaiting happens inside the
/// returned future. A failing provider is skipped unless every provider fails.
pub fn provide_suggestion_items(
    document: &DocumentSnapshot,
    position: Position,
    snippet_mode: SnippetMode,
    providers: &[ProviderHandle],
) -> FetchFuture {
    let requests: Vec<_> = providers
        .iter()
        .map(|handle| {
            (
                handle.name().to_string(),
                handle.provider.provide(document, position),
            )
        })
        .collect();

    Box::pin(async move {
        let count = requests.len();
        let mut result = SuggestResult::default();
        let mut last_error = None;
        let mut succeeded = 0usize;

        for (name, request) in requests {
            match request.await {
                Ok(suggestions) => {
                    succeeded += 1;
                    result.incomplete |= suggestions.incomplete;
                    result.items.extend(suggestions.items);
                }
                Err(err) => {
                    tracing::warn!(target: "suggest.fetch", provider = %name, error = %err, "provider failed");
                    last_error = Some(err);
                }
            }
        }

        if succeeded == 0 {
            if let Some(last) = last_error {
                return Err(FetchError::AllProvidersFailed { count, last });
            }
        }

        apply_snippet_mode(&mut result.items, snippet_mode);
        tracing::trace!(
            target: "suggest.fetch",
            items = result.items.len(),
            incomplete = result.incomplete,
            "fetch merged"
        );
        Ok(result)
    })
}

pub fn apply_snippet_mode(items: &mut Vec<SuggestItem>, mode: SnippetMode) {
    match mode {
        SnippetMode::Inline => {}
        SnippetMode::None => items.retain(|item| !item.is_snippet()),
        // Stable sorts keep provider order within each group.
        SnippetMode::Top => items.sort_by_key(|item| !item.is_snippet()),
        SnippetMode::Bottom => items.sort_by_key(SuggestItem::is_snippet),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/fetch.rs"]
mod tests;
