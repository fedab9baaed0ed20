use super::*;
use crate::kernel::services::ports::{
    ProviderFuture, ProviderSuggestions, SuggestProvider,
};
use crate::models::Position;
use std::sync::Arc;

struct StubProvider {
    name: &'static str,
    triggers: Vec<char>,
    language: Option<&'static str>,
}

impl StubProvider {
    fn new(name: &'static str, triggers: &[char]) -> Arc<Self> {
        Arc::new(Self {
            name,
            triggers: triggers.to_vec(),
            language: None,
        })
    }

    fn for_language(name: &'static str, triggers: &[char], language: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            triggers: triggers.to_vec(),
            language: Some(language),
        })
    }
}

impl SuggestProvider for StubProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn trigger_characters(&self) -> &[char] {
        &self.triggers
    }

    fn applies_to(&self, language_id: &str) -> bool {
        self.language.map_or(true, |lang| lang == language_id)
    }

    fn provide(&self, _document: &DocumentSnapshot, _position: Position) -> ProviderFuture {
        Box::pin(async { Ok(ProviderSuggestions::default()) })
    }
}

fn names(bucket: Option<&[ProviderHandle]>) -> Vec<String> {
    bucket
        .unwrap_or_default()
        .iter()
        .map(|handle| handle.name().to_string())
        .collect()
}

fn doc() -> DocumentSnapshot {
    DocumentSnapshot::new("fn main() {}\n", "rust")
}

#[test]
fn buckets_follow_registration_order() {
    let registry = ProviderRegistry::new();
    registry.register(StubProvider::new("b", &['.', ':']));
    registry.register(StubProvider::new("a", &['.']));

    let mut index = TriggerCharacterIndex::new();
    index.rebuild(&SuggestConfig::default(), Some(&doc()), false, &registry);

    assert_eq!(names(index.providers_for('.')), ["b", "a"]);
    assert_eq!(names(index.providers_for(':')), ["b"]);
    assert!(index.providers_for('(').is_none());
}

#[test]
fn duplicate_trigger_characters_do_not_duplicate_providers() {
    let registry = ProviderRegistry::new();
    registry.register(StubProvider::new("dup", &['.', '.']));

    let mut index = TriggerCharacterIndex::new();
    index.rebuild(&SuggestConfig::default(), Some(&doc()), false, &registry);

    assert_eq!(names(index.providers_for('.')), ["dup"]);
}

#[test]
fn only_providers_for_the_document_language_are_indexed() {
    let registry = ProviderRegistry::new();
    registry.register(StubProvider::for_language("py", &['.'], "python"));
    registry.register(StubProvider::for_language("rs", &['.'], "rust"));

    let mut index = TriggerCharacterIndex::new();
    index.rebuild(&SuggestConfig::default(), Some(&doc()), false, &registry);

    assert_eq!(names(index.providers_for('.')), ["rs"]);
}

#[test]
fn disabled_read_only_or_missing_document_yields_empty_index() {
    let registry = ProviderRegistry::new();
    registry.register(StubProvider::new("p", &['.']));
    let mut index = TriggerCharacterIndex::new();

    index.rebuild(&SuggestConfig::default(), None, false, &registry);
    assert!(index.is_empty());

    index.rebuild(&SuggestConfig::default(), Some(&doc()), true, &registry);
    assert!(index.is_empty());

    let config = SuggestConfig {
        suggest_on_trigger_characters: false,
        ..SuggestConfig::default()
    };
    index.rebuild(&config, Some(&doc()), false, &registry);
    assert!(index.is_empty());
}

#[test]
fn rebuild_drops_stale_entries() {
    let registry = ProviderRegistry::new();
    let id = registry.register(StubProvider::new("p", &['.']));
    let mut index = TriggerCharacterIndex::new();
    index.rebuild(&SuggestConfig::default(), Some(&doc()), false, &registry);
    assert!(index.providers_for('.').is_some());

    assert!(registry.unregister(id));
    index.rebuild(&SuggestConfig::default(), Some(&doc()), false, &registry);
    assert!(index.providers_for('.').is_none());
    assert_eq!(index.characters().count(), 0);
}
