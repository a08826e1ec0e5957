// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events and their outcomes.

use crate::bus::EventKind;

/// Keys the dropdown reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Close.
    Escape,
    /// Close; focus moves on as usual.
    Tab,
    /// Activate the highlighted item, then close.
    Enter,
    /// Highlight the previous item, or open when closed.
    ArrowUp,
    /// Highlight the next item, or open when closed.
    ArrowDown,
    /// A printable character.
    Character(char),
    /// Any other key.
    Other,
}

/// A document-level event, as delivered through the bus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DocumentEvent<K> {
    /// A pointer press on `target`, the innermost node under the pointer.
    PointerDown {
        /// Innermost pressed node.
        target: K,
    },
    /// A key press.
    KeyDown(Key),
}

impl<K> DocumentEvent<K> {
    /// The bus channel this event travels on.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::KeyDown(_) => EventKind::KeyDown,
        }
    }
}

/// Outcome of a key press handled by one dropdown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The host should suppress the key's default action (scrolling, form submission).
    pub default_prevented: bool,
}

/// Outcome of a document-level dispatch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatched {
    /// How many listeners the event reached.
    pub delivered: usize,
    /// Whether any listener asked to suppress the default action.
    pub default_prevented: bool,
}
