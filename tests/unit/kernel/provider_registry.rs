use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::kernel::services::ports::{ProviderFuture, ProviderSuggestions};
use crate::models::{DocumentSnapshot, Position};

struct LanguageProvider {
    name: &'static str,
    language: Option<&'static str>,
}

impl SuggestProvider for LanguageProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn applies_to(&self, language_id: &str) -> bool {
        self.language.map_or(true, |language| language == language_id)
    }

    fn provide(&self, _document: &DocumentSnapshot, _position: Position) -> ProviderFuture {
        Box::pin(async { Ok(ProviderSuggestions::default()) })
    }
}

fn provider(name: &'static str, language: Option<&'static str>) -> Arc<dyn SuggestProvider> {
    Arc::new(LanguageProvider { name, language })
}

fn names(handles: &[ProviderHandle]) -> Vec<&str> {
    handles.iter().map(ProviderHandle::name).collect()
}

#[test]
fn providers_are_listed_in_registration_order_and_filtered_by_language() {
    let registry = ProviderRegistry::new();
    registry.register(provider("words", None));
    registry.register(provider("rust-analyzer", Some("rust")));
    registry.register(provider("pyright", Some("python")));

    assert_eq!(names(&registry.providers_for("rust")), ["words", "rust-analyzer"]);
    assert_eq!(names(&registry.providers_for("python")), ["words", "pyright"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn unregister_removes_once_and_reports_changes() {
    let registry = ProviderRegistry::new();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let subscription = registry.on_did_change(move |change| sink.borrow_mut().push(*change));

    let words = registry.register(provider("words", None));
    let other = registry.register(provider("other", None));
    assert!(registry.unregister(words));
    assert!(!registry.unregister(words));

    assert_eq!(names(&registry.providers_for("rust")), ["other"]);
    assert_eq!(
        *changes.borrow(),
        [
            RegistryChange::Registered(words),
            RegistryChange::Registered(other),
            RegistryChange::Unregistered(words),
        ]
    );

    drop(subscription);
    assert_eq!(registry.listener_count(), 0);
    registry.register(provider("late", None));
    assert_eq!(changes.borrow().len(), 3);
}

#[test]
fn listener_may_query_the_registry_while_notified() {
    let registry = Rc::new(ProviderRegistry::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let weak = Rc::downgrade(&registry);
    let sink = Rc::clone(&seen);
    let _subscription = registry.on_did_change(move |_| {
        if let Some(registry) = weak.upgrade() {
            sink.borrow_mut().push(registry.len());
        }
    });

    registry.register(provider("a", None));
    registry.register(provider("b", None));

    assert_eq!(*seen.borrow(), [1, 2]);
}

#[test]
fn handles_compare_by_id() {
    let registry = ProviderRegistry::new();
    registry.register(provider("same", None));
    registry.register(provider("same", None));

    let handles = registry.providers_for("rust");
    assert_ne!(handles[0], handles[1]);
    assert_eq!(handles[0], handles[0].clone());
}
