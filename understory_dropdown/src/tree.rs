// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small retained node tree implementing [`MenuHost`].
//!
//! Hosts with their own widget tree implement [`MenuHost`] directly. [`MenuTree`] covers the
//! rest: it records parent/child links and item state, and queues activations so the host can
//! act on them after the dropdown has handled the input.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::host::{ItemState, MenuHost, ancestors};

#[derive(Clone, Debug)]
struct Node<K> {
    parent: Option<K>,
    children: Vec<K>,
    item: Option<ItemState>,
}

/// Retained tree of nodes, some of which are selectable items.
#[derive(Clone, Debug)]
pub struct MenuTree<K> {
    nodes: HashMap<K, Node<K>>,
    activated: Vec<K>,
}

impl<K: Copy + Eq + Hash> MenuTree<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            activated: Vec::new(),
        }
    }

    /// Insert a plain node as the last child of `parent` (or as a root).
    ///
    /// Re-inserting an existing node moves it, keeping its subtree. A move under the node
    /// itself or one of its descendants is ignored.
    pub fn insert(&mut self, parent: Option<K>, node: K) {
        self.insert_node(parent, node, None);
    }

    /// Insert a selectable item as the last child of `parent`.
    pub fn insert_item(&mut self, parent: K, node: K, disabled: bool) {
        self.insert_node(
            Some(parent),
            node,
            Some(ItemState {
                disabled,
                active: false,
            }),
        );
    }

    fn insert_node(&mut self, parent: Option<K>, node: K, item: Option<ItemState>) {
        if parent.is_some_and(|p| self.is_within(p, node)) {
            return;
        }
        let parent = parent.filter(|p| self.nodes.contains_key(p));
        self.detach(node);
        let children = self
            .nodes
            .remove(&node)
            .map(|n| n.children)
            .unwrap_or_default();
        self.nodes.insert(
            node,
            Node {
                parent,
                children,
                item,
            },
        );
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.push(node);
        }
    }

    /// Enable or disable an item. Returns `false` if `node` is not an item.
    pub fn set_disabled(&mut self, node: K, disabled: bool) -> bool {
        match self.nodes.get_mut(&node).and_then(|n| n.item.as_mut()) {
            Some(item) => {
                item.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Remove `node` and its whole subtree.
    pub fn remove(&mut self, node: K) {
        self.detach(node);
        let mut stack = alloc::vec![node];
        while let Some(k) = stack.pop() {
            if let Some(n) = self.nodes.remove(&k) {
                stack.extend(n.children);
            }
        }
    }

    /// Whether `node` is in the tree.
    pub fn contains(&self, node: K) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Whether `node` is an item with its `active` flag set.
    pub fn is_active(&self, node: K) -> bool {
        self.item(node).is_some_and(|i| i.active)
    }

    /// Every item currently flagged active.
    pub fn active_items(&self) -> impl Iterator<Item = K> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.item.is_some_and(|i| i.active))
            .map(|(k, _)| *k)
    }

    /// Drain the items activated since the last call, oldest first.
    pub fn take_activated(&mut self) -> Vec<K> {
        core::mem::take(&mut self.activated)
    }

    /// Whether `node` is `ancestor` or lies in its subtree.
    fn is_within(&self, node: K, ancestor: K) -> bool {
        ancestors(self, node).any(|k| k == ancestor)
    }

    fn detach(&mut self, node: K) {
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
    }

    fn collect_items(&self, menu: K) -> Vec<K> {
        let mut out = Vec::new();
        let Some(root) = self.nodes.get(&menu) else {
            return out;
        };
        // Pre-order, so items come out in rendered order.
        let mut stack: Vec<K> = root.children.iter().rev().copied().collect();
        while let Some(k) = stack.pop() {
            if let Some(n) = self.nodes.get(&k) {
                if n.item.is_some() {
                    out.push(k);
                }
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }
}

impl<K: Copy + Eq + Hash> Default for MenuTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> MenuHost<K> for MenuTree<K> {
    fn parent(&self, node: K) -> Option<K> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn items(&self, menu: K) -> impl Iterator<Item = K> {
        self.collect_items(menu).into_iter()
    }

    fn item(&self, node: K) -> Option<ItemState> {
        self.nodes.get(&node).and_then(|n| n.item)
    }

    fn set_active(&mut self, item: K, active: bool) {
        if let Some(state) = self.nodes.get_mut(&item).and_then(|n| n.item.as_mut()) {
            state.active = active;
        }
    }

    fn activate(&mut self, item: K) {
        if self.item(item).is_some() {
            self.activated.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // root(1) ─ menu(2) ─┬ item(10)
    //                    ├ group(3) ─┬ item(11, disabled)
    //                    │           └ item(12)
    //                    └ item(13)
    fn sample() -> MenuTree<u32> {
        let mut t = MenuTree::new();
        t.insert(None, 1);
        t.insert(Some(1), 2);
        t.insert_item(2, 10, false);
        t.insert(Some(2), 3);
        t.insert_item(3, 11, true);
        t.insert_item(3, 12, false);
        t.insert_item(2, 13, false);
        t
    }

    #[test]
    fn items_come_out_in_rendered_order() {
        let t = sample();
        let items: Vec<u32> = t.items(2).collect();
        assert_eq!(items, vec![10, 11, 12, 13]);
        assert_eq!(t.items(3).collect::<Vec<_>>(), vec![11, 12]);
        assert_eq!(t.items(99).count(), 0);
    }

    #[test]
    fn parents_and_item_state() {
        let t = sample();
        assert_eq!(t.parent(12), Some(3));
        assert_eq!(t.parent(1), None);
        assert_eq!(t.item(11).map(|i| i.disabled), Some(true));
        assert!(t.item(3).is_none());
    }

    #[test]
    fn active_flags_and_activation_queue() {
        let mut t = sample();
        t.set_active(12, true);
        t.set_active(3, true);
        assert!(t.is_active(12));
        assert!(!t.is_active(3));
        assert_eq!(t.active_items().collect::<Vec<_>>(), vec![12]);

        t.activate(10);
        t.activate(3);
        t.activate(13);
        assert_eq!(t.take_activated(), vec![10, 13]);
        assert!(t.take_activated().is_empty());
    }

    #[test]
    fn remove_drops_the_subtree() {
        let mut t = sample();
        t.remove(3);
        assert!(!t.contains(11));
        assert!(!t.contains(12));
        assert_eq!(t.items(2).collect::<Vec<_>>(), vec![10, 13]);
    }

    #[test]
    fn reinsert_moves_a_node() {
        let mut t = sample();
        t.insert(Some(1), 3);
        assert_eq!(t.parent(3), Some(1));
        assert_eq!(t.items(2).collect::<Vec<_>>(), vec![10, 13]);
        assert_eq!(t.items(1).collect::<Vec<_>>(), vec![10, 13, 11, 12]);
    }

    #[test]
    fn moving_under_a_descendant_is_ignored() {
        let mut t = sample();
        t.insert(Some(12), 2);
        t.insert(Some(2), 2);
        t.insert_item(3, 3, false);
        assert_eq!(t.parent(2), Some(1));
        assert_eq!(t.parent(3), Some(2));
        assert!(t.item(3).is_none());
        assert_eq!(t.items(2).collect::<Vec<_>>(), vec![10, 11, 12, 13]);
        // The walk up from a leaf still ends at the root.
        assert_eq!(ancestors(&t, 12).collect::<Vec<_>>(), vec![12, 3, 2, 1]);
    }

    #[test]
    fn toggling_disabled() {
        let mut t = sample();
        assert!(t.set_disabled(11, false));
        assert!(!t.set_disabled(3, true));
        assert_eq!(t.item(11).map(|i| i.disabled), Some(false));
    }
}
