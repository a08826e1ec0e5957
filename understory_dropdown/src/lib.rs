// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Dropdown: headless dropdown menu controller.
//!
//! This crate implements the behavior of a dropdown (a trigger that reveals a floating menu of
//! selectable items) without owning any rendering. The host owns its visual tree; the
//! controller reads ancestry and item state through [`MenuHost`] and reports what changed.
//!
//! The core concepts are:
//!
//! - [`DropdownScope`]: the composition root. It owns the [`Registry`] of live dropdowns, an
//!   injected [`EventBus`](bus::EventBus) for document-level events, and an injected
//!   [`AnchorEngine`] that positions each menu next to its trigger. At most one dropdown of a
//!   scope is open at a time.
//! - [`Dropdown`]: per-instance state (phase, highlighted item, placement, subscriptions).
//! - [`MenuHost`]: the host's tree. [`MenuTree`] is a small retained implementation for hosts
//!   without one.
//! - [`nav`]: wrap-around stepping over the enabled items.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_dropdown::{
//!     DropdownOptions, DropdownParts, DropdownScope, Key, MenuTree,
//! };
//!
//! // document(0) ─ root(1) ─┬ trigger(2)
//! //                         └ menu(3) ─┬ item(10)
//! //                                    ├ item(11, disabled)
//! //                                    └ item(12)
//! let mut tree = MenuTree::new();
//! tree.insert(None, 0);
//! tree.insert(Some(0), 1);
//! tree.insert(Some(1), 2);
//! tree.insert(Some(1), 3);
//! tree.insert_item(3, 10, false);
//! tree.insert_item(3, 11, true);
//! tree.insert_item(3, 12, false);
//!
//! let mut scope = DropdownScope::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let parts = DropdownParts { root: 1, trigger: 2, menu: 3 };
//! let id = scope.insert(parts, DropdownOptions::default());
//! scope.mounted(id);
//!
//! // Clicking the trigger opens the menu.
//! scope.toggle(id, &mut tree);
//! assert!(scope.is_open(id));
//!
//! // Arrow keys skip the disabled item.
//! scope.handle_key(id, Key::ArrowDown, &mut tree);
//! scope.handle_key(id, Key::ArrowDown, &mut tree);
//! assert_eq!(scope.highlighted(id, &tree), Some(12));
//!
//! // Enter activates the highlighted item and closes.
//! let outcome = scope.handle_key(id, Key::Enter, &mut tree);
//! assert!(outcome.default_prevented);
//! assert_eq!(tree.take_activated(), vec![12]);
//! assert!(!scope.is_open(id));
//! ```
//!
//! ## Document events
//!
//! While open, a dropdown subscribes to pointer-down and key-down events on the bus. The host
//! forwards document-level input with [`DropdownScope::dispatch`]; a press outside the root or
//! on an enabled item closes the menu.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_dropdown::{
//!     DocumentEvent, DropdownOptions, DropdownParts, DropdownScope, MenuTree,
//! };
//!
//! let mut tree = MenuTree::new();
//! tree.insert(None, 0);
//! tree.insert(Some(0), 1);
//! tree.insert(Some(1), 2);
//! tree.insert(Some(1), 3);
//! tree.insert(Some(0), 4);
//!
//! let mut scope = DropdownScope::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let id = scope.insert(
//!     DropdownParts { root: 1, trigger: 2, menu: 3 },
//!     DropdownOptions::default(),
//! );
//! scope.mounted(id);
//! scope.open(id, &mut tree);
//! assert_eq!(scope.bus().len(), 2);
//!
//! let out = scope.dispatch(&DocumentEvent::PointerDown { target: 4 }, &mut tree);
//! assert_eq!(out.delivered, 1);
//! assert!(!scope.is_open(id));
//! assert!(scope.bus().is_empty());
//! ```
//!
//! ## Host responsibilities
//!
//! - Call [`mounted`](DropdownScope::mounted) once the nodes exist and
//!   [`unmounted`](DropdownScope::unmounted) when they go away.
//! - Feed layout into the positioning engine (for [`Anchorer`], via
//!   [`anchors_mut`](DropdownScope::anchors_mut)) and draw the menu at
//!   [`menu_position`](DropdownScope::menu_position).
//! - Show the menu while [`Dropdown::is_menu_visible`], and report the end of the hide
//!   transition with [`transition_end`](DropdownScope::transition_end).
//! - Render [`Dropdown::semantics`] for accessibility.
//! - Suppress the default action of pointer presses on the menu node, so focus stays on the
//!   trigger and keyboard navigation keeps working while the pointer is used.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `understory_anchor`, `kurbo`, and `tracing`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bus;
mod dropdown;
mod event;
mod host;
pub mod nav;
mod registry;
mod scope;
mod tree;

pub use dropdown::{Dropdown, DropdownId, DropdownOptions, DropdownParts, MenuSemantics, Phase};
pub use event::{Dispatched, DocumentEvent, Key, KeyOutcome};
pub use host::{ItemState, MenuHost};
pub use registry::{Ids, Registry};
pub use scope::DropdownScope;
pub use tree::MenuTree;

pub use understory_anchor::{AnchorEngine, Anchorer, Placement, Resolved};
