// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance dropdown state.
//!
//! [`Dropdown`] is plain data: every transition goes through
//! [`DropdownScope`](crate::DropdownScope), which owns the registry, the event bus, and the
//! positioning engine the transitions touch.

use core::fmt;

use understory_anchor::{Placement, SessionId};

use crate::bus::Subscriptions;

/// Identity of a dropdown within its registry.
///
/// Assigned from a monotonic counter at construction and never reused. The `Display` form
/// (`dropdown-N`) is suitable for accessibility linkage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DropdownId(pub(crate) u32);

impl fmt::Display for DropdownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropdown-{}", self.0)
    }
}

/// Non-owning handles to the nodes a dropdown renders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropdownParts<K> {
    /// Outermost node; presses outside of it dismiss the menu.
    pub root: K,
    /// The node whose activation toggles the menu, and the positioning anchor.
    pub trigger: K,
    /// The floating menu holding the items.
    pub menu: K,
}

/// Construction options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropdownOptions {
    /// Preferred menu placement. Defaults to `bottom-start`.
    pub placement: Placement,
    /// Whether the menu stays visible after closing until
    /// [`transition_end`](crate::DropdownScope::transition_end) reports that the hide
    /// transition finished. When `false`, closing hides the menu immediately.
    pub animated: bool,
}

impl Default for DropdownOptions {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            animated: true,
        }
    }
}

/// Open/close phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Closed and hidden.
    #[default]
    Closed,
    /// Open and visible.
    Open,
    /// Closed, but the menu stays visible until its hide transition ends.
    Closing,
}

/// Accessibility signalling for the rendering layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuSemantics {
    /// `aria-expanded` on the root.
    pub expanded: bool,
    /// `aria-haspopup` on the root; always true.
    pub has_popup: bool,
    /// `aria-hidden` on the menu.
    pub menu_hidden: bool,
    /// The menu is labelled by the root, identified by this id.
    pub labelled_by: DropdownId,
}

/// State of one dropdown.
#[derive(Clone, Debug)]
pub struct Dropdown<K> {
    pub(crate) id: DropdownId,
    pub(crate) parts: DropdownParts<K>,
    pub(crate) phase: Phase,
    pub(crate) highlighted: Option<K>,
    pub(crate) placement: Placement,
    pub(crate) animated: bool,
    pub(crate) mounted: bool,
    pub(crate) session: Option<SessionId>,
    pub(crate) subscriptions: Subscriptions,
}

impl<K: Copy> Dropdown<K> {
    pub(crate) fn new(id: DropdownId, parts: DropdownParts<K>, options: DropdownOptions) -> Self {
        Self {
            id,
            parts,
            phase: Phase::Closed,
            highlighted: None,
            placement: options.placement,
            animated: options.animated,
            mounted: false,
            session: None,
            subscriptions: Subscriptions::default(),
        }
    }

    /// Identity of this dropdown.
    pub fn id(&self) -> DropdownId {
        self.id
    }

    /// The nodes this dropdown renders.
    pub fn parts(&self) -> DropdownParts<K> {
        self.parts
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Whether the menu node should be visible (open, or closing and still transitioning).
    pub fn is_menu_visible(&self) -> bool {
        matches!(self.phase, Phase::Open | Phase::Closing)
    }

    /// Whether the host reported the dropdown as mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Preferred menu placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Whether closing waits for a transition end.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// The positioning session, live while mounted.
    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    /// Whether document-level subscriptions are held.
    pub fn is_subscribed(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Accessibility state to render.
    pub fn semantics(&self) -> MenuSemantics {
        MenuSemantics {
            expanded: self.is_open(),
            has_popup: true,
            menu_hidden: !self.is_open(),
            labelled_by: self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn parts() -> DropdownParts<u32> {
        DropdownParts {
            root: 1,
            trigger: 2,
            menu: 3,
        }
    }

    #[test]
    fn starts_closed_and_unmounted() {
        let d = Dropdown::new(DropdownId(4), parts(), DropdownOptions::default());
        assert_eq!(d.phase(), Phase::Closed);
        assert!(!d.is_open());
        assert!(!d.is_menu_visible());
        assert!(!d.is_mounted());
        assert!(d.session().is_none());
        assert!(!d.is_subscribed());
        assert_eq!(d.placement(), Placement::BottomStart);
    }

    #[test]
    fn closing_is_visible_but_not_open() {
        let mut d = Dropdown::new(DropdownId(1), parts(), DropdownOptions::default());
        d.phase = Phase::Closing;
        assert!(!d.is_open());
        assert!(d.is_menu_visible());
        assert!(d.semantics().menu_hidden);
    }

    #[test]
    fn semantics_follow_open_state() {
        let mut d = Dropdown::new(DropdownId(7), parts(), DropdownOptions::default());
        d.phase = Phase::Open;
        let s = d.semantics();
        assert!(s.expanded);
        assert!(s.has_popup);
        assert!(!s.menu_hidden);
        assert_eq!(s.labelled_by.to_string(), "dropdown-7");
    }
}
