//! Registry of suggestion providers, in registration order.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use slotmap::SlotMap;

use crate::core::{Emitter, Subscription};
use crate::kernel::services::ports::{ProviderId, SuggestProvider};

#[derive(Clone)]
pub struct ProviderHandle {
    pub id: ProviderId,
    pub provider: Arc<dyn SuggestProvider>,
}

impl ProviderHandle {
    pub fn name(&self) -> &str {
        self.provider.name()
    }
}

impl PartialEq for ProviderHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ProviderHandle {}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("id", &self.id)
            .field("name", &self.provider.name())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryChange {
    Registered(ProviderId),
    Unregistered(ProviderId),
}

#[derive(Default)]
struct RegistryInner {
    providers: SlotMap<ProviderId, Arc<dyn SuggestProvider>>,
    order: Vec<ProviderId>,
}

#[derive(Default)]
pub struct ProviderRegistry {
    inner: RefCell<RegistryInner>,
    on_did_change: Emitter<RegistryChange>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, provider: Arc<dyn SuggestProvider>) -> ProviderId {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let name = provider.name().to_string();
            let id = inner.providers.insert(provider);
            inner.order.push(id);
            tracing::debug!(target: "suggest.registry", provider = %name, "provider registered");
            id
        };
        self.on_did_change.fire(&RegistryChange::Registered(id));
        id
    }

    pub fn unregister(&self, id: ProviderId) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let removed = inner.providers.remove(id).is_some();
            if removed {
                inner.order.retain(|other| *other != id);
            }
            removed
        };
        if removed {
            self.on_did_change.fire(&RegistryChange::Unregistered(id));
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Providers applicable to `language_id`, in registration order.
    pub fn providers_for(&self, language_id: &str) -> Vec<ProviderHandle> {
        let inner = self.inner.borrow();
        inner
            .order
            .iter()
            .filter_map(|id| {
                let provider = inner.providers.get(*id)?;
                provider.applies_to(language_id).then(|| ProviderHandle {
                    id: *id,
                    provider: Arc::clone(provider),
                })
            })
            .collect()
    }

    #[must_use = "dropping the subscription removes the listener"]
    pub fn on_did_change(&self, listener: impl FnMut(&RegistryChange) + 'static) -> Subscription {
        self.on_did_change.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.on_did_change.listener_count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/provider_registry.rs"]
mod tests;
