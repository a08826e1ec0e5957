// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning sessions.
//!
//! A session ties a floating node to an anchor node with a preferred [`Placement`]. The
//! engine keeps it resolved as layout changes until the session is released.
//!
//! ## Lifecycle
//!
//! 1) [`AnchorEngine::register`] once the anchor and floating nodes exist.
//! 2) [`AnchorEngine::set_placement`] whenever the preferred placement changes.
//! 3) [`AnchorEngine::recompute_now`] right before the floating node becomes visible, so it
//!    never shows up at a stale position.
//! 4) [`AnchorEngine::release`] exactly once at teardown.
//!
//! Every operation on an unknown or already released session is a silent no-op. Hosts do not
//! fully control mount/unmount ordering, so stale handles are expected.

use hashbrown::HashMap;
use kurbo::Rect;

use crate::geometry::{Offset, Resolved, resolve};
use crate::placement::Placement;

/// Handle for a registered positioning session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

/// The contract between a floating-box controller and its positioning engine.
pub trait AnchorEngine<K> {
    /// Begin keeping `floating` positioned against `anchor`.
    fn register(&mut self, anchor: K, floating: K, placement: Placement) -> SessionId;

    /// Change the preferred placement; takes effect on the next recompute.
    fn set_placement(&mut self, session: SessionId, placement: Placement);

    /// Resolve the session's position immediately.
    fn recompute_now(&mut self, session: SessionId);

    /// Stop synchronizing the session and forget it.
    fn release(&mut self, session: SessionId);

    /// The most recently resolved position, if the session is live and resolvable.
    fn resolved(&self, session: SessionId) -> Option<Resolved>;
}

#[derive(Clone, Debug)]
struct Session<K> {
    anchor: K,
    floating: K,
    placement: Placement,
    dirty: bool,
    resolved: Option<Resolved>,
}

impl<K: Eq> Session<K> {
    fn references(&self, node: &K) -> bool {
        self.anchor == *node || self.floating == *node
    }
}

/// Reference [`AnchorEngine`] driven by host-provided bounds.
///
/// The host feeds world-space bounds for anchor and floating nodes with
/// [`set_bounds`](Self::set_bounds) after each layout, and calls [`update`](Self::update) as
/// part of its layout pass. Only the floating node's size matters; its origin is what the
/// engine computes.
///
/// Sessions whose anchor or floating bounds are unknown resolve to `None`.
#[derive(Clone, Debug)]
pub struct Anchorer<K> {
    viewport: Rect,
    offset: Offset,
    bounds: HashMap<K, Rect>,
    sessions: HashMap<SessionId, Session<K>>,
    next_session: u64,
}

impl<K: Copy + Eq + core::hash::Hash> Anchorer<K> {
    /// Create an engine constrained to `viewport`, using the default [`Offset`].
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            offset: Offset::default(),
            bounds: HashMap::new(),
            sessions: HashMap::new(),
            next_session: 1,
        }
    }

    /// Use `offset` for every session.
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.set_offset(offset);
        self
    }

    /// The viewport floating boxes are kept inside.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Change the viewport; every session is re-resolved on the next [`update`](Self::update).
    pub fn set_viewport(&mut self, viewport: Rect) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.mark_all_dirty();
        }
    }

    /// The offset applied between anchors and floating boxes.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Change the offset; every session is re-resolved on the next [`update`](Self::update).
    pub fn set_offset(&mut self, offset: Offset) {
        if self.offset != offset {
            self.offset = offset;
            self.mark_all_dirty();
        }
    }

    /// Record the current bounds of `node`.
    ///
    /// Sessions anchored to or floating `node` are re-resolved on the next
    /// [`update`](Self::update). Unchanged bounds do not dirty anything.
    pub fn set_bounds(&mut self, node: K, rect: Rect) {
        if self.bounds.insert(node, rect) == Some(rect) {
            return;
        }
        self.mark_dirty(&node);
    }

    /// Forget the bounds of `node`; sessions referencing it stop resolving.
    pub fn remove_bounds(&mut self, node: K) {
        if self.bounds.remove(&node).is_some() {
            self.mark_dirty(&node);
        }
    }

    /// Re-resolve every dirty session.
    ///
    /// Returns how many sessions ended up at a different position or placement.
    pub fn update(&mut self) -> usize {
        let mut changed = 0;
        for (id, session) in &mut self.sessions {
            if !session.dirty {
                continue;
            }
            if apply(&self.bounds, self.viewport, self.offset, *id, session) {
                changed += 1;
            }
        }
        changed
    }

    /// Whether `session` is registered and not yet released.
    pub fn is_live(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    /// The preferred placement of a live session.
    pub fn placement(&self, session: SessionId) -> Option<Placement> {
        self.sessions.get(&session).map(|s| s.placement)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn mark_dirty(&mut self, node: &K) {
        for session in self.sessions.values_mut() {
            if session.references(node) {
                session.dirty = true;
            }
        }
    }

    fn mark_all_dirty(&mut self) {
        for session in self.sessions.values_mut() {
            session.dirty = true;
        }
    }
}

impl<K: Copy + Eq + core::hash::Hash> AnchorEngine<K> for Anchorer<K> {
    fn register(&mut self, anchor: K, floating: K, placement: Placement) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session += 1;
        self.sessions.insert(
            id,
            Session {
                anchor,
                floating,
                placement,
                dirty: true,
                resolved: None,
            },
        );
        tracing::trace!(session = ?id, %placement, "anchor session registered");
        id
    }

    fn set_placement(&mut self, session: SessionId, placement: Placement) {
        if let Some(s) = self.sessions.get_mut(&session) {
            if s.placement != placement {
                s.placement = placement;
                s.dirty = true;
            }
        }
    }

    fn recompute_now(&mut self, session: SessionId) {
        if let Some(s) = self.sessions.get_mut(&session) {
            apply(&self.bounds, self.viewport, self.offset, session, s);
        }
    }

    fn release(&mut self, session: SessionId) {
        if self.sessions.remove(&session).is_some() {
            tracing::trace!(session = ?session, "anchor session released");
        }
    }

    fn resolved(&self, session: SessionId) -> Option<Resolved> {
        self.sessions.get(&session).and_then(|s| s.resolved)
    }
}

/// Resolve `session` against the current layout and store the result.
///
/// Returns whether the stored result changed.
fn apply<K: Eq + core::hash::Hash>(
    bounds: &HashMap<K, Rect>,
    viewport: Rect,
    offset: Offset,
    id: SessionId,
    session: &mut Session<K>,
) -> bool {
    session.dirty = false;
    let next = match (bounds.get(&session.anchor), bounds.get(&session.floating)) {
        (Some(anchor), Some(floating)) => Some(resolve(
            *anchor,
            floating.size(),
            viewport,
            session.placement,
            offset,
        )),
        _ => None,
    };
    if next == session.resolved {
        return false;
    }
    if let Some(r) = &next {
        if r.placement != session.placement {
            tracing::trace!(
                session = ?id,
                preferred = %session.placement,
                actual = %r.placement,
                "anchor flipped"
            );
        }
    }
    session.resolved = next;
    true
}
