use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! { struct ListenerKey; }

type Listener<E> = Rc<RefCell<dyn FnMut(&E)>>;
type ListenerMap<E> = SlotMap<ListenerKey, Listener<E>>;

/// Single-threaded event emitter.
///
/// Listeners are stored behind their own `RefCell`, so a listener may dispose
/// subscriptions (including its own) while an event is being fired.
pub struct Emitter<E> {
    listeners: Rc<RefCell<ListenerMap<E>>>,
}

impl<E: 'static> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    #[must_use = "dropping the subscription removes the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&E) + 'static) -> Subscription {
        let listener: Listener<E> = Rc::new(RefCell::new(listener));
        let key = self.listeners.borrow_mut().insert(listener);
        let weak: Weak<RefCell<ListenerMap<E>>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.borrow_mut().remove(key);
            }
        })
    }

    pub fn fire(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self.listeners.borrow().values().cloned().collect();
        for listener in snapshot {
            // A listener that re-fires this emitter must not re-enter itself.
            let Ok(mut listener) = listener.try_borrow_mut() else {
                tracing::trace!(target: "suggest.event", "skipping re-entrant listener");
                continue;
            };
            (&mut *listener)(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

impl<E: 'static> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

/// Handle to a registered listener. Disposing (or dropping) it releases the
/// listener exactly once.
#[must_use = "dropping the subscription removes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Ordered set of subscriptions released together.
#[derive(Debug, Default)]
pub struct DisposableStore {
    items: Vec<Subscription>,
    disposed: bool,
}

impl DisposableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mut subscription: Subscription) {
        if self.disposed {
            tracing::warn!(
                target: "suggest.event",
                "subscription added to a disposed store, releasing it immediately"
            );
            subscription.dispose();
            return;
        }
        self.items.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for mut item in self.items.drain(..) {
            item.dispose();
        }
    }
}

impl Drop for DisposableStore {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
