// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Anchor: anchored placement of floating boxes.
//!
//! This crate positions a floating box (a menu, popover, or tooltip) next to an anchor box
//! (usually the control that revealed it). It is renderer-agnostic: hosts feed it world-space
//! rectangles after layout and read back where the floating box should go.
//!
//! The core concepts are:
//!
//! - [`Placement`]: the preferred corner alignment of the floating box relative to its anchor
//!   (`bottom-start`, `bottom-end`, `top-start`, `top-end`).
//! - [`resolve`]: pure geometry. Given an anchor, a floating size, and a viewport, picks the
//!   preferred placement if it fits, otherwise the first fallback that does.
//! - [`AnchorEngine`]: the session contract a controller depends on. A session is registered
//!   once, has its placement updated, is recomputed on demand, and is released at teardown.
//! - [`Anchorer`]: the reference engine. It keeps node bounds fed by the host and re-resolves
//!   every session whose anchor, floating box, or viewport changed.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_anchor::{Offset, Placement, resolve};
//!
//! let viewport = Rect::new(0.0, 0.0, 200.0, 200.0);
//! let trigger = Rect::new(10.0, 170.0, 60.0, 190.0);
//! let menu = Size::new(80.0, 60.0);
//!
//! // No room below the trigger, so the menu flips above it.
//! let resolved = resolve(trigger, menu, viewport, Placement::BottomStart, Offset::default());
//! assert_eq!(resolved.placement, Placement::TopStart);
//! assert_eq!(resolved.rect, Rect::new(10.0, 108.0, 90.0, 168.0));
//! ```
//!
//! ## Sessions
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_anchor::{AnchorEngine, Anchorer, Placement};
//!
//! let mut anchors: Anchorer<u32> = Anchorer::new(Rect::new(0.0, 0.0, 400.0, 300.0));
//! anchors.set_bounds(1, Rect::new(20.0, 20.0, 120.0, 44.0));
//! anchors.set_bounds(2, Rect::new(0.0, 0.0, 160.0, 90.0));
//!
//! let session = anchors.register(1, 2, Placement::BottomStart);
//! anchors.recompute_now(session);
//! let at = anchors.resolved(session).unwrap();
//! assert_eq!(at.rect.origin(), kurbo::Point::new(20.0, 46.0));
//!
//! anchors.release(session);
//! assert!(anchors.resolved(session).is_none());
//! ```
//!
//! All rectangles live in one caller-chosen coordinate space (typically the world space of a
//! box tree) and are expected to be finite.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`, `thiserror`, and `tracing`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod geometry;
mod placement;

pub use engine::{AnchorEngine, Anchorer, SessionId};
pub use geometry::{Offset, Resolved, fits, place, resolve};
pub use placement::{Align, ParsePlacementError, Placement, Side};
