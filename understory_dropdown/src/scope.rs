// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown controller: the open/close state machine and its input handling.
//!
//! ## Overview
//!
//! [`DropdownScope`] is the composition root for a set of dropdowns. It owns the
//! [`Registry`], the injected [`EventBus`], and the injected [`AnchorEngine`]. The host owns
//! the visual tree and passes it in as a [`MenuHost`] on every call that reads or writes items.
//!
//! ## Transitions
//!
//! - `Closed → Open` ([`open`](DropdownScope::open)): the menu becomes visible, the
//!   positioning session is recomputed immediately, every other dropdown in the scope is
//!   closed, and the dropdown subscribes to document pointer and key events.
//! - `Open → Closing` ([`close`](DropdownScope::close)): the highlight is cleared and the
//!   document subscriptions are released. The menu stays visible until
//!   [`transition_end`](DropdownScope::transition_end), or is hidden right away when the
//!   dropdown is not animated.
//! - `Closing → Open` is allowed; a transition end arriving afterwards is ignored.
//!
//! ## Invariants
//!
//! - At most one dropdown of a scope is open.
//! - A highlighted item is enabled and belongs to the menu; reads re-validate it against the
//!   current items.
//! - Document subscriptions are held exactly while open.
//! - The positioning session is live exactly between mount and unmount.
//!
//! Operations on unknown, unmounted, or already torn down dropdowns are no-ops.

use core::hash::Hash;

use kurbo::Rect;
use smallvec::SmallVec;
use understory_anchor::{AnchorEngine, Anchorer, Placement, Resolved};

use crate::bus::{DocumentBus, EventBus, EventKind};
use crate::dropdown::{Dropdown, DropdownId, DropdownOptions, DropdownParts, Phase};
use crate::event::{Dispatched, DocumentEvent, Key, KeyOutcome};
use crate::host::{MenuHost, ancestors};
use crate::nav::{self, Direction};
use crate::registry::Registry;

type ItemList<K> = SmallVec<[K; 16]>;

/// A set of dropdowns sharing one document, with single-open coordination.
///
/// See the [module docs](self) for the state machine.
#[derive(Clone, Debug)]
pub struct DropdownScope<K, B = DocumentBus<DropdownId>, E = Anchorer<K>> {
    registry: Registry<K>,
    bus: B,
    anchors: E,
}

impl<K: Copy + Eq + Hash> DropdownScope<K> {
    /// Create a scope with a fresh [`DocumentBus`] and an [`Anchorer`] for `viewport`.
    pub fn new(viewport: Rect) -> Self {
        Self::with_services(DocumentBus::new(), Anchorer::new(viewport))
    }
}

impl<K, B, E> DropdownScope<K, B, E>
where
    K: Copy + Eq,
    B: EventBus<DropdownId>,
    E: AnchorEngine<K>,
{
    /// Create a scope around an existing event bus and positioning engine.
    pub fn with_services(bus: B, anchors: E) -> Self {
        Self {
            registry: Registry::new(),
            bus,
            anchors,
        }
    }

    /// Construct a dropdown. It stays inert until [`mounted`](Self::mounted).
    pub fn insert(&mut self, parts: DropdownParts<K>, options: DropdownOptions) -> DropdownId {
        self.registry.insert(parts, options)
    }

    /// Host callback: the dropdown's nodes exist. Acquires the positioning session once.
    pub fn mounted(&mut self, id: DropdownId) {
        let Some(d) = self.registry.get_mut(id) else {
            return;
        };
        if d.mounted {
            return;
        }
        d.mounted = true;
        d.session = Some(
            self.anchors
                .register(d.parts.trigger, d.parts.menu, d.placement),
        );
        tracing::debug!(dropdown = %id, "mounted");
    }

    /// Host callback: the dropdown's nodes are gone.
    ///
    /// Closes without waiting for a transition, releases the subscriptions and the
    /// positioning session, and removes the dropdown from the registry. The items went away
    /// with the menu, so their `active` flags are left alone.
    pub fn unmounted(&mut self, id: DropdownId) {
        let Some(mut d) = self.registry.remove(id) else {
            return;
        };
        d.subscriptions.release(&mut self.bus);
        if let Some(session) = d.session.take() {
            self.anchors.release(session);
        }
        tracing::debug!(dropdown = %id, "unmounted");
    }

    /// Open the menu. No-op unless mounted and not already open.
    pub fn open<H: MenuHost<K>>(&mut self, id: DropdownId, host: &mut H) {
        let Some(d) = self.registry.get_mut(id) else {
            return;
        };
        if !d.mounted || d.is_open() {
            return;
        }
        d.phase = Phase::Open;
        if let Some(session) = d.session {
            self.anchors.recompute_now(session);
        }
        tracing::debug!(dropdown = %id, "open");

        // Close is idempotent, so every sibling gets one regardless of its state.
        for other in self.registry.ids() {
            if other != id {
                self.close(other, host);
            }
        }

        if let Some(d) = self.registry.get_mut(id) {
            d.subscriptions
                .add(&mut self.bus, EventKind::PointerDown, id);
            d.subscriptions.add(&mut self.bus, EventKind::KeyDown, id);
        }
    }

    /// Close the menu. No-op unless open.
    pub fn close<H: MenuHost<K>>(&mut self, id: DropdownId, host: &mut H) {
        let Some(d) = self.registry.get_mut(id) else {
            return;
        };
        if !d.is_open() {
            return;
        }
        d.phase = if d.animated {
            Phase::Closing
        } else {
            Phase::Closed
        };
        d.subscriptions.release(&mut self.bus);
        set_highlight(d, host, None);
        tracing::debug!(dropdown = %id, "close");
    }

    /// Open when closed, close when open. Bound to trigger activation.
    pub fn toggle<H: MenuHost<K>>(&mut self, id: DropdownId, host: &mut H) {
        if self.is_open(id) {
            self.close(id, host);
        } else {
            self.open(id, host);
        }
    }

    /// Host callback: the menu's show/hide transition finished.
    ///
    /// Hides the menu if the dropdown is still closing; ignored otherwise, so a late signal
    /// after a reopen leaves the menu visible.
    pub fn transition_end(&mut self, id: DropdownId) {
        if let Some(d) = self.registry.get_mut(id) {
            if d.phase == Phase::Closing {
                d.phase = Phase::Closed;
            }
        }
    }

    /// Change the preferred placement, forwarding it to a live positioning session.
    pub fn set_placement(&mut self, id: DropdownId, placement: Placement) {
        let Some(d) = self.registry.get_mut(id) else {
            return;
        };
        d.placement = placement;
        if let Some(session) = d.session {
            self.anchors.set_placement(session, placement);
        }
    }

    /// Handle a key press for one dropdown.
    ///
    /// - `Escape`, `Tab`: close.
    /// - `Enter` while open: activate the highlighted item, if any, then close. The key's
    ///   default action is suppressed either way.
    /// - `ArrowDown`, `ArrowUp`: open when closed; otherwise move the highlight with wrap-around
    ///   and suppress the default scroll.
    pub fn handle_key<H: MenuHost<K>>(
        &mut self,
        id: DropdownId,
        key: Key,
        host: &mut H,
    ) -> KeyOutcome {
        let Some(d) = self.registry.get(id) else {
            return KeyOutcome::default();
        };
        if !d.mounted {
            return KeyOutcome::default();
        }
        let open = d.is_open();
        match key {
            Key::Escape | Key::Tab => {
                self.close(id, host);
                KeyOutcome::default()
            }
            Key::Enter if open => {
                if let Some(item) = self.highlighted(id, host) {
                    host.activate(item);
                    self.close(id, host);
                }
                KeyOutcome {
                    default_prevented: true,
                }
            }
            Key::ArrowDown | Key::ArrowUp if !open => {
                self.open(id, host);
                KeyOutcome::default()
            }
            Key::ArrowDown | Key::ArrowUp => {
                if let Some(direction) = Direction::from_key(key) {
                    self.navigate(id, direction, host);
                }
                KeyOutcome {
                    default_prevented: true,
                }
            }
            _ => KeyOutcome::default(),
        }
    }

    /// Move the highlight one enabled item in `direction`, wrapping at the ends.
    ///
    /// No-op when closed or when the menu has no enabled items.
    pub fn navigate<H: MenuHost<K>>(&mut self, id: DropdownId, direction: Direction, host: &mut H) {
        let Some(d) = self.registry.get_mut(id) else {
            return;
        };
        if !d.is_open() {
            return;
        }
        let eligible = eligible(&*host, d.parts.menu);
        if let Some(next) = nav::step(&eligible, d.highlighted, direction) {
            set_highlight(d, host, Some(next));
            tracing::trace!(dropdown = %id, ?direction, "highlight moved");
        }
    }

    /// Pointer moved over `target` inside the menu.
    ///
    /// Highlights the enabled item under the pointer; an item that is disabled clears the
    /// highlight. Targets outside the menu or between items change nothing.
    pub fn pointer_over<H: MenuHost<K>>(&mut self, id: DropdownId, target: K, host: &mut H) {
        let Some(d) = self.registry.get_mut(id) else {
            return;
        };
        if !d.is_open() {
            return;
        }
        let menu = d.parts.menu;
        let mut item = None;
        let mut in_menu = false;
        for node in ancestors(&*host, target) {
            if node == menu {
                in_menu = true;
                break;
            }
            if item.is_none() && host.item(node).is_some() {
                item = Some(node);
            }
        }
        if in_menu && item.is_some() {
            set_highlight(d, host, item);
        }
    }

    /// Pointer left the menu: clear the highlight.
    pub fn pointer_leave<H: MenuHost<K>>(&mut self, id: DropdownId, host: &mut H) {
        if let Some(d) = self.registry.get_mut(id) {
            if d.is_open() {
                set_highlight(d, host, None);
            }
        }
    }

    /// Deliver a document-level event to the dropdowns subscribed to it.
    ///
    /// Listeners are visited in subscription order over a snapshot; one that unsubscribed
    /// earlier in the same dispatch is skipped.
    pub fn dispatch<H: MenuHost<K>>(
        &mut self,
        event: &DocumentEvent<K>,
        host: &mut H,
    ) -> Dispatched {
        let mut out = Dispatched::default();
        for (subscription, id) in self.bus.listeners(event.kind()) {
            if !self.bus.is_subscribed(subscription) {
                continue;
            }
            out.delivered += 1;
            match *event {
                DocumentEvent::PointerDown { target } => self.document_press(id, target, host),
                DocumentEvent::KeyDown(key) => {
                    out.default_prevented |= self.handle_key(id, key, host).default_prevented;
                }
            }
        }
        out
    }

    /// Outside-press dismissal for an open dropdown.
    ///
    /// Closes when the press lands outside the root, or on an enabled item. The item's own
    /// activation is the host's business and happens independently.
    fn document_press<H: MenuHost<K>>(&mut self, id: DropdownId, target: K, host: &mut H) {
        let Some(d) = self.registry.get(id) else {
            return;
        };
        if !d.is_open() {
            return;
        }
        let root = d.parts.root;
        let mut inside = false;
        let mut item = None;
        for node in ancestors(&*host, target) {
            if item.is_none() {
                item = host.item(node);
            }
            if node == root {
                inside = true;
                break;
            }
        }
        if !inside || item.is_some_and(|i| !i.disabled) {
            self.close(id, host);
        }
    }

    /// Look up a dropdown.
    pub fn get(&self, id: DropdownId) -> Option<&Dropdown<K>> {
        self.registry.get(id)
    }

    /// Whether `id` is open.
    pub fn is_open(&self, id: DropdownId) -> bool {
        self.registry.get(id).is_some_and(Dropdown::is_open)
    }

    /// The open dropdown of this scope, if any.
    pub fn open_dropdown(&self) -> Option<DropdownId> {
        self.registry.iter().find(|d| d.is_open()).map(Dropdown::id)
    }

    /// The highlighted item, if it is still an enabled item of the menu.
    pub fn highlighted<H: MenuHost<K>>(&self, id: DropdownId, host: &H) -> Option<K> {
        let d = self.registry.get(id)?;
        let item = d.highlighted?;
        let enabled = host.item(item).is_some_and(|i| !i.disabled);
        (enabled && host.items(d.parts.menu).any(|k| k == item)).then_some(item)
    }

    /// Where the menu should be drawn, as last resolved by the positioning engine.
    pub fn menu_position(&self, id: DropdownId) -> Option<Resolved> {
        let session = self.registry.get(id)?.session?;
        self.anchors.resolved(session)
    }

    /// The registry of live dropdowns.
    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    /// The document event bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// The positioning engine.
    pub fn anchors(&self) -> &E {
        &self.anchors
    }

    /// The positioning engine, for feeding layout.
    pub fn anchors_mut(&mut self) -> &mut E {
        &mut self.anchors
    }
}

/// Enabled items of `menu`, in rendered order.
fn eligible<K: Copy, H: MenuHost<K>>(host: &H, menu: K) -> ItemList<K> {
    host.items(menu)
        .filter(|&k| host.item(k).is_some_and(|i| !i.disabled))
        .collect()
}

/// Make `item` the only active item of the menu, or clear every item for `None`.
///
/// An item that is not an enabled member of the menu clears the highlight as well.
fn set_highlight<K: Copy + Eq, H: MenuHost<K>>(d: &mut Dropdown<K>, host: &mut H, item: Option<K>) {
    let items: ItemList<K> = host.items(d.parts.menu).collect();
    let item = item.filter(|k| items.contains(k) && host.item(*k).is_some_and(|i| !i.disabled));
    for k in items {
        host.set_active(k, Some(k) == item);
    }
    d.highlighted = item;
}
