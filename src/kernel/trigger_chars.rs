//! Trigger-character index: which providers want to be asked when a given
//! character is typed.

use rustc_hash::FxHashMap;

use crate::kernel::provider_registry::{ProviderHandle, ProviderRegistry};
use crate::kernel::services::ports::SuggestConfig;
use crate::models::DocumentSnapshot;

#[derive(Debug, Default)]
pub struct TriggerCharacterIndex {
    buckets: FxHashMap<char, Vec<ProviderHandle>>,
}

impl TriggerCharacterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds from scratch. The index stays empty for read-only editors,
    /// editors without a document, or when trigger characters are disabled.
    pub fn rebuild(
        &mut self,
        config: &SuggestConfig,
        document: Option<&DocumentSnapshot>,
        read_only: bool,
        registry: &ProviderRegistry,
    ) {
        self.buckets.clear();

        let Some(document) = document else {
            return;
        };
        if read_only || !config.suggest_on_trigger_characters {
            return;
        }

        for handle in registry.providers_for(document.language_id()) {
            for &ch in handle.provider.trigger_characters() {
                let bucket = self.buckets.entry(ch).or_default();
                if !bucket.contains(&handle) {
                    bucket.push(handle.clone());
                }
            }
        }

        tracing::debug!(
            target: "suggest.trigger_chars",
            language = document.language_id(),
            characters = self.buckets.len(),
            "trigger character index rebuilt"
        );
    }

    pub fn providers_for(&self, ch: char) -> Option<&[ProviderHandle]> {
        self.buckets
            .get(&ch)
            .map(Vec::as_slice)
            .filter(|bucket| !bucket.is_empty())
    }

    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        self.buckets.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/trigger_chars.rs"]
mod tests;
