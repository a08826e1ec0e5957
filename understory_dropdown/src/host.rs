// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host's side of the contract: node ancestry and selectable items.

/// State of one selectable item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemState {
    /// Disabled items are skipped by navigation and never highlighted.
    pub disabled: bool,
    /// Whether the item is the highlighted one. Written by the dropdown.
    pub active: bool,
}

/// Access to the host's visual tree and the items in it.
///
/// The dropdown never owns nodes or items; it reads ancestry and item state through this
/// trait and writes only the `active` flag. Items identify themselves through
/// [`item`](Self::item), so composing code does not register them with the dropdown.
///
/// Calls naming nodes that no longer exist should be ignored.
pub trait MenuHost<K> {
    /// Parent of `node`, or `None` for a root or unknown node.
    fn parent(&self, node: K) -> Option<K>;

    /// Every selectable item inside `menu`, disabled ones included, in rendered order.
    fn items(&self, menu: K) -> impl Iterator<Item = K>;

    /// Item state of `node`, or `None` if `node` is not a selectable item.
    fn item(&self, node: K) -> Option<ItemState>;

    /// Set the `active` flag of `item`.
    fn set_active(&mut self, item: K, active: bool);

    /// Run the item's activation action.
    fn activate(&mut self, item: K);
}

/// Walk from `node` up through its ancestors, `node` included.
pub(crate) fn ancestors<K: Copy, H: MenuHost<K>>(
    host: &H,
    node: K,
) -> impl Iterator<Item = K> {
    core::iter::successors(Some(node), move |&n| host.parent(n))
}
