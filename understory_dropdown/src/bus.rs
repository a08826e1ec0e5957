// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document event bus: document-wide pointer and key subscriptions.
//!
//! Dropdowns observe presses and key strokes anywhere in the document while they are open,
//! not only inside their own subtree. The bus is injected into the
//! [`DropdownScope`](crate::DropdownScope) instead of being ambient global state, so tests can
//! build an isolated bus per case.
//!
//! Listeners are delivered in subscription order. [`EventBus::listeners`] returns a snapshot,
//! so handlers may subscribe or unsubscribe while a dispatch walks it.

use alloc::vec::Vec;
use smallvec::SmallVec;

/// Kind of document-level event a listener subscribes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A pointer press anywhere in the document.
    PointerDown,
    /// A key press anywhere in the document.
    KeyDown,
}

/// Handle for one subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Snapshot of the listeners for one event kind, in subscription order.
pub type Listeners<L> = SmallVec<[(SubscriptionId, L); 4]>;

/// Subscribe/unsubscribe contract for document-level events.
pub trait EventBus<L> {
    /// Start delivering events of `kind` to `listener`.
    fn subscribe(&mut self, kind: EventKind, listener: L) -> SubscriptionId;

    /// Stop a subscription. Returns `false` if it was not active.
    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool;

    /// Whether `subscription` is still active.
    fn is_subscribed(&self, subscription: SubscriptionId) -> bool;

    /// Current listeners for `kind`, in subscription order.
    fn listeners(&self, kind: EventKind) -> Listeners<L>;
}

#[derive(Clone, Debug)]
struct Entry<L> {
    id: SubscriptionId,
    kind: EventKind,
    listener: L,
}

/// Reference [`EventBus`]: an ordered subscription list.
///
/// Any number of independent listeners may subscribe to the same kind; delivery order is
/// subscription order.
#[derive(Clone, Debug)]
pub struct DocumentBus<L> {
    entries: Vec<Entry<L>>,
    next_id: u64,
}

impl<L> DocumentBus<L> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no active subscriptions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: PartialEq> DocumentBus<L> {
    /// Number of active subscriptions held by `listener`.
    pub fn subscriptions_of(&self, listener: &L) -> usize {
        self.entries.iter().filter(|e| e.listener == *listener).count()
    }
}

impl<L> Default for DocumentBus<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Copy> EventBus<L> for DocumentBus<L> {
    fn subscribe(&mut self, kind: EventKind, listener: L) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, kind, listener });
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        match self.entries.iter().position(|e| e.id == subscription) {
            Some(pos) => {
                // `remove` keeps the remaining subscriptions in order.
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    fn is_subscribed(&self, subscription: SubscriptionId) -> bool {
        self.entries.iter().any(|e| e.id == subscription)
    }

    fn listeners(&self, kind: EventKind) -> Listeners<L> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.id, e.listener))
            .collect()
    }
}

/// A group of subscriptions acquired together and released together.
#[derive(Clone, Debug, Default)]
pub struct Subscriptions {
    ids: SmallVec<[SubscriptionId; 2]>,
}

impl Subscriptions {
    /// Subscribe `listener` to `kind` and keep the handle.
    pub fn add<L>(&mut self, bus: &mut impl EventBus<L>, kind: EventKind, listener: L) {
        self.ids.push(bus.subscribe(kind, listener));
    }

    /// Unsubscribe everything in the group.
    pub fn release<L>(&mut self, bus: &mut impl EventBus<L>) {
        for id in self.ids.drain(..) {
            bus.unsubscribe(id);
        }
    }

    /// Whether the group holds no subscriptions.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of subscriptions in the group.
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_in_subscription_order() {
        let mut bus: DocumentBus<u32> = DocumentBus::new();
        bus.subscribe(EventKind::KeyDown, 3);
        bus.subscribe(EventKind::PointerDown, 1);
        bus.subscribe(EventKind::KeyDown, 1);
        bus.subscribe(EventKind::KeyDown, 2);

        let keys: Vec<u32> = bus.listeners(EventKind::KeyDown).iter().map(|l| l.1).collect();
        assert_eq!(keys, [3, 1, 2]);
        let presses: Vec<u32> = bus
            .listeners(EventKind::PointerDown)
            .iter()
            .map(|l| l.1)
            .collect();
        assert_eq!(presses, [1]);
    }

    #[test]
    fn unsubscribe_keeps_order_of_the_rest() {
        let mut bus: DocumentBus<u32> = DocumentBus::new();
        let _a = bus.subscribe(EventKind::KeyDown, 1);
        let b = bus.subscribe(EventKind::KeyDown, 2);
        let _c = bus.subscribe(EventKind::KeyDown, 3);

        assert!(bus.unsubscribe(b));
        assert!(!bus.unsubscribe(b));
        assert!(!bus.is_subscribed(b));
        let keys: Vec<u32> = bus.listeners(EventKind::KeyDown).iter().map(|l| l.1).collect();
        assert_eq!(keys, [1, 3]);
    }

    #[test]
    fn snapshot_is_not_a_live_view() {
        let mut bus: DocumentBus<u32> = DocumentBus::new();
        let a = bus.subscribe(EventKind::KeyDown, 1);
        let snapshot = bus.listeners(EventKind::KeyDown);
        bus.unsubscribe(a);
        bus.subscribe(EventKind::KeyDown, 2);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0], (a, 1));
    }

    #[test]
    fn group_release_drops_every_subscription() {
        let mut bus: DocumentBus<u32> = DocumentBus::new();
        let mut group = Subscriptions::default();
        group.add(&mut bus, EventKind::PointerDown, 7);
        group.add(&mut bus, EventKind::KeyDown, 7);
        bus.subscribe(EventKind::KeyDown, 8);
        assert_eq!(group.len(), 2);
        assert_eq!(bus.subscriptions_of(&7), 2);

        group.release(&mut bus);
        assert!(group.is_empty());
        assert_eq!(bus.subscriptions_of(&7), 0);
        assert_eq!(bus.len(), 1);
    }
}
