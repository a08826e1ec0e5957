// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of live dropdowns in one scope.
//!
//! Membership changes only at construction and unmount. Ids are handed out in increasing
//! order and entries are kept sorted by id, so lookups are a binary search and iteration
//! follows construction order.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::dropdown::{Dropdown, DropdownId, DropdownOptions, DropdownParts};

/// Snapshot of registry membership.
pub type Ids = SmallVec<[DropdownId; 8]>;

/// Live dropdowns of one scope.
#[derive(Clone, Debug)]
pub struct Registry<K> {
    entries: Vec<Dropdown<K>>,
    next_id: u32,
}

impl<K: Copy> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Construct a dropdown and add it to the registry.
    pub fn insert(&mut self, parts: DropdownParts<K>, options: DropdownOptions) -> DropdownId {
        let id = DropdownId(self.next_id);
        self.next_id += 1;
        self.entries.push(Dropdown::new(id, parts, options));
        id
    }

    /// Remove a dropdown, returning its final state.
    pub fn remove(&mut self, id: DropdownId) -> Option<Dropdown<K>> {
        let idx = self.index_of(id)?;
        Some(self.entries.remove(idx))
    }

    /// Look up a dropdown.
    pub fn get(&self, id: DropdownId) -> Option<&Dropdown<K>> {
        self.index_of(id).map(|i| &self.entries[i])
    }

    pub(crate) fn get_mut(&mut self, id: DropdownId) -> Option<&mut Dropdown<K>> {
        let idx = self.index_of(id)?;
        Some(&mut self.entries[idx])
    }

    /// Whether `id` is a live member.
    pub fn contains(&self, id: DropdownId) -> bool {
        self.index_of(id).is_some()
    }

    /// Snapshot of every member id, in construction order.
    ///
    /// The snapshot does not follow later insertions or removals.
    pub fn ids(&self) -> Ids {
        self.entries.iter().map(|d| d.id).collect()
    }

    /// Iterate over the members in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &Dropdown<K>> {
        self.entries.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, id: DropdownId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |d| d.id).ok()
    }
}

impl<K: Copy> Default for Registry<K> {
    fn default() -> Self {
        Self::new()
    }
}
