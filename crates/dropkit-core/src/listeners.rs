#![forbid(unsafe_code)]

//! Scoped document-level listeners.
//!
//! Some widgets need input that happens *outside* their own area: a popup
//! closes when the user presses the pointer elsewhere, or when the window
//! loses focus. Instead of a process-wide listener, a widget acquires a
//! [`ListenerGuard`] from the host's [`ListenerRegistry`] while it needs that
//! input and drops it when it no longer does. The host asks the registry who
//! is interested before dispatching.
//!
//! # Invariants
//!
//! 1. A subscription is live exactly as long as its guard.
//! 2. Dropping the registry first is harmless; the guard's release becomes a
//!    no-op.
//! 3. Ids are never reused within one registry.
//!
//! The registry is single-threaded (`Rc`): every widget on a page runs on the
//! host's event thread.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ahash::AHashMap;
use bitflags::bitflags;

/// Identifier of one live subscription.
pub type ListenerId = u64;

bitflags! {
    /// Kinds of document-level input a subscriber wants to see.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ListenerKinds: u8 {
        /// Pointer presses anywhere in the document.
        const POINTER_DOWN = 0b01;
        /// The window losing focus.
        const WINDOW_BLUR  = 0b10;
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: ListenerId,
    entries: AHashMap<ListenerId, ListenerKinds>,
}

/// Host-owned table of live document-level subscriptions.
///
/// Cloning yields another handle to the same table.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `kinds`. The subscription lasts until the guard drops.
    #[must_use = "dropping the guard releases the subscription immediately"]
    pub fn subscribe(&self, kinds: ListenerKinds) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.entries.insert(id, kinds);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: crate::logging::CORE_TARGET,
            message = "listeners.subscribe",
            id,
            kinds = ?kinds,
            live = inner.entries.len()
        );
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Whether the subscription `id` is live.
    #[must_use]
    pub fn is_active(&self, id: ListenerId) -> bool {
        self.inner.borrow().entries.contains_key(&id)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Live subscriptions interested in `kind`, in ascending id order.
    #[must_use]
    pub fn subscribers(&self, kind: ListenerKinds) -> Vec<ListenerId> {
        let inner = self.inner.borrow();
        let mut ids: Vec<ListenerId> = inner
            .entries
            .iter()
            .filter(|(_, kinds)| kinds.intersects(kind))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// RAII handle for one subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<RefCell<RegistryInner>>,
}

impl ListenerGuard {
    /// The subscription id, for routing dispatched input back to the owner.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            let mut inner = inner.borrow_mut();
            inner.entries.remove(&self.id);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: crate::logging::CORE_TARGET,
                message = "listeners.release",
                id = self.id,
                live = inner.entries.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_and_release() {
        let registry = ListenerRegistry::new();
        let guard = registry.subscribe(ListenerKinds::POINTER_DOWN);
        let id = guard.id();
        assert!(registry.is_active(id));
        assert_eq!(registry.active_count(), 1);
        drop(guard);
        assert!(!registry.is_active(id));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn ids_are_not_reused() {
        let registry = ListenerRegistry::new();
        let first = registry.subscribe(ListenerKinds::WINDOW_BLUR).id();
        let second = registry.subscribe(ListenerKinds::WINDOW_BLUR).id();
        assert_ne!(first, second);
    }

    #[test]
    fn subscribers_filters_by_kind() {
        let registry = ListenerRegistry::new();
        let pointer = registry.subscribe(ListenerKinds::POINTER_DOWN);
        let both = registry.subscribe(ListenerKinds::POINTER_DOWN | ListenerKinds::WINDOW_BLUR);
        let blur = registry.subscribe(ListenerKinds::WINDOW_BLUR);

        assert_eq!(
            registry.subscribers(ListenerKinds::POINTER_DOWN),
            vec![pointer.id(), both.id()]
        );
        assert_eq!(
            registry.subscribers(ListenerKinds::WINDOW_BLUR),
            vec![both.id(), blur.id()]
        );
    }

    #[test]
    fn clones_share_the_table() {
        let registry = ListenerRegistry::new();
        let handle = registry.clone();
        let _guard = handle.subscribe(ListenerKinds::POINTER_DOWN);
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::new();
        let guard = registry.subscribe(ListenerKinds::POINTER_DOWN);
        drop(registry);
        drop(guard);
    }
}
