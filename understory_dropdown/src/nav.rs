// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wrap-around stepping over navigable items.
//!
//! Only enabled items are navigable. Callers pass the eligible items in rendered order, so
//! disabled items never take part in the index arithmetic.
//!
//! ```rust
//! use understory_dropdown::nav::{Direction, step};
//!
//! let eligible = ['a', 'b', 'c'];
//! assert_eq!(step(&eligible, None, Direction::Next), Some('a'));
//! assert_eq!(step(&eligible, Some('c'), Direction::Next), Some('a'));
//! assert_eq!(step(&eligible, Some('a'), Direction::Prev), Some('c'));
//! assert_eq!(step::<char>(&[], None, Direction::Next), None);
//! ```

use crate::event::Key;

/// Direction of a navigation step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the end of the list.
    Next,
    /// Towards the start of the list.
    Prev,
}

impl Direction {
    /// The direction an arrow key moves in, if it is one.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowDown => Some(Self::Next),
            Key::ArrowUp => Some(Self::Prev),
            _ => None,
        }
    }
}

/// Step from `current` in `direction` over `eligible`, wrapping at both ends.
///
/// A `current` that is absent or no longer eligible counts as index -1, so `Next` lands on the
/// first item and `Prev` on the last. Returns `None` only when `eligible` is empty.
pub fn step<K: Copy + PartialEq>(
    eligible: &[K],
    current: Option<K>,
    direction: Direction,
) -> Option<K> {
    let last = eligible.len().checked_sub(1)?;
    let index = current.and_then(|c| eligible.iter().position(|&k| k == c));
    let next = match (direction, index) {
        (Direction::Next, None) => 0,
        (Direction::Next, Some(i)) if i >= last => 0,
        (Direction::Next, Some(i)) => i + 1,
        // -1 - 1 wraps to the last item as well.
        (Direction::Prev, None | Some(0)) => last,
        (Direction::Prev, Some(i)) => i - 1,
    };
    Some(eligible[next])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn next_walks_then_wraps() {
        let items = [1, 2, 3];
        let mut cur = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            cur = step(&items, cur, Direction::Next);
            seen.push(cur.unwrap());
        }
        assert_eq!(seen, [1, 2, 3, 1]);
    }

    #[test]
    fn prev_from_nothing_lands_on_last() {
        assert_eq!(step(&[1, 2, 3], None, Direction::Prev), Some(3));
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let items = [10, 20, 30, 40];
        assert_eq!(step(&items, Some(10), Direction::Prev), Some(40));
        assert_eq!(step(&items, Some(40), Direction::Next), Some(10));
    }

    #[test]
    fn stale_current_counts_as_unset() {
        assert_eq!(step(&[1, 2, 3], Some(9), Direction::Next), Some(1));
        assert_eq!(step(&[1, 2, 3], Some(9), Direction::Prev), Some(3));
    }

    #[test]
    fn single_item_stays_put() {
        assert_eq!(step(&[5], Some(5), Direction::Next), Some(5));
        assert_eq!(step(&[5], Some(5), Direction::Prev), Some(5));
    }

    #[test]
    fn empty_is_a_no_op() {
        assert_eq!(step::<u8>(&[], Some(1), Direction::Prev), None);
    }

    #[test]
    fn arrows_map_to_directions() {
        assert_eq!(Direction::from_key(Key::ArrowDown), Some(Direction::Next));
        assert_eq!(Direction::from_key(Key::ArrowUp), Some(Direction::Prev));
        assert_eq!(Direction::from_key(Key::Enter), None);
    }
}
