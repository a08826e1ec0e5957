// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement geometry: where a floating box goes for a given placement, and which placement
//! wins when the preferred one overflows the viewport.

use kurbo::{Point, Rect, Size};

use crate::placement::{Align, Placement, Side};

/// Offset of the floating box from its anchor.
///
/// `distance` pushes the floating box away from the anchor along the placement side (down for
/// `bottom-*`, up for `top-*`). `skidding` shifts it along the anchor edge, in +x.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Offset {
    /// Shift along the aligned edge.
    pub skidding: f64,
    /// Gap between the anchor and the floating box.
    pub distance: f64,
}

impl Offset {
    /// No offset at all: the floating box touches its anchor.
    pub const ZERO: Self = Self {
        skidding: 0.0,
        distance: 0.0,
    };
}

impl Default for Offset {
    /// A two-unit gap, no skidding.
    fn default() -> Self {
        Self {
            skidding: 0.0,
            distance: 2.0,
        }
    }
}

/// The outcome of placement resolution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    /// The placement actually used; may differ from the preferred one.
    pub placement: Placement,
    /// Where the floating box goes.
    pub rect: Rect,
}

/// Compute the rectangle of a floating box of `size` placed against `anchor`.
pub fn place(anchor: Rect, size: Size, placement: Placement, offset: Offset) -> Rect {
    let x = match placement.align() {
        Align::Start => anchor.x0 + offset.skidding,
        Align::End => anchor.x1 + offset.skidding - size.width,
    };
    let y = match placement.side() {
        Side::Bottom => anchor.y1 + offset.distance,
        Side::Top => anchor.y0 - offset.distance - size.height,
    };
    Rect::from_origin_size(Point::new(x, y), size)
}

/// Whether `rect` lies entirely within `viewport` (edges inclusive).
pub fn fits(rect: Rect, viewport: Rect) -> bool {
    rect.x0 >= viewport.x0
        && rect.y0 >= viewport.y0
        && rect.x1 <= viewport.x1
        && rect.y1 <= viewport.y1
}

/// Pick a placement for a floating box and compute where it goes.
///
/// Candidates are tried in [`Placement::fallbacks`] order and the first one that fits the
/// viewport wins, so the result never overflows when any of the four placements fits.
/// When none fits, the candidate with the most visible area is used; ties keep the earlier
/// candidate.
pub fn resolve(
    anchor: Rect,
    size: Size,
    viewport: Rect,
    preferred: Placement,
    offset: Offset,
) -> Resolved {
    let mut best: Option<(f64, Resolved)> = None;
    for placement in preferred.fallbacks() {
        let rect = place(anchor, size, placement, offset);
        let candidate = Resolved { placement, rect };
        if fits(rect, viewport) {
            return candidate;
        }
        let visible = rect.intersect(viewport).area();
        if best.is_none_or(|(area, _)| visible > area) {
            best = Some((visible, candidate));
        }
    }
    best.map(|(_, r)| r).unwrap_or(Resolved {
        placement: preferred,
        rect: place(anchor, size, preferred, offset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 200.0, 200.0);
    const MENU: Size = Size::new(80.0, 60.0);

    #[test]
    fn place_each_corner() {
        let anchor = Rect::new(50.0, 50.0, 150.0, 70.0);
        assert_eq!(
            place(anchor, MENU, Placement::BottomStart, Offset::ZERO),
            Rect::new(50.0, 70.0, 130.0, 130.0)
        );
        assert_eq!(
            place(anchor, MENU, Placement::BottomEnd, Offset::ZERO),
            Rect::new(70.0, 70.0, 150.0, 130.0)
        );
        assert_eq!(
            place(anchor, MENU, Placement::TopStart, Offset::ZERO),
            Rect::new(50.0, -10.0, 130.0, 50.0)
        );
        assert_eq!(
            place(anchor, MENU, Placement::TopEnd, Offset::ZERO),
            Rect::new(70.0, -10.0, 150.0, 50.0)
        );
    }

    #[test]
    fn offset_moves_away_from_anchor() {
        let anchor = Rect::new(50.0, 100.0, 150.0, 120.0);
        let offset = Offset {
            skidding: 5.0,
            distance: 2.0,
        };
        let below = place(anchor, MENU, Placement::BottomStart, offset);
        assert_eq!(below.origin(), Point::new(55.0, 122.0));
        let above = place(anchor, MENU, Placement::TopStart, offset);
        assert_eq!(above.y1, 98.0);
    }

    #[test]
    fn preferred_wins_when_it_fits() {
        let anchor = Rect::new(10.0, 10.0, 60.0, 30.0);
        let r = resolve(anchor, MENU, VIEWPORT, Placement::BottomStart, Offset::default());
        assert_eq!(r.placement, Placement::BottomStart);
        assert!(fits(r.rect, VIEWPORT));
    }

    #[test]
    fn flips_vertically_near_bottom_edge() {
        let anchor = Rect::new(10.0, 170.0, 60.0, 190.0);
        let r = resolve(anchor, MENU, VIEWPORT, Placement::BottomStart, Offset::default());
        assert_eq!(r.placement, Placement::TopStart);
    }

    #[test]
    fn flips_horizontally_near_right_edge() {
        // Start alignment would run past x = 200, end alignment stays inside.
        let anchor = Rect::new(150.0, 10.0, 190.0, 30.0);
        let r = resolve(anchor, MENU, VIEWPORT, Placement::BottomStart, Offset::default());
        assert_eq!(r.placement, Placement::BottomEnd);
        assert!(fits(r.rect, VIEWPORT));
    }

    #[test]
    fn flips_both_axes_in_bottom_right_corner() {
        let anchor = Rect::new(150.0, 170.0, 190.0, 190.0);
        let r = resolve(anchor, MENU, VIEWPORT, Placement::BottomStart, Offset::default());
        assert_eq!(r.placement, Placement::TopEnd);
        assert!(fits(r.rect, VIEWPORT));
    }

    #[test]
    fn any_fitting_placement_is_found() {
        let anchors = [
            Rect::new(10.0, 10.0, 60.0, 30.0),
            Rect::new(150.0, 10.0, 190.0, 30.0),
            Rect::new(10.0, 170.0, 60.0, 190.0),
            Rect::new(150.0, 170.0, 190.0, 190.0),
        ];
        for anchor in anchors {
            for preferred in Placement::ALL {
                let r = resolve(anchor, MENU, VIEWPORT, preferred, Offset::default());
                assert!(fits(r.rect, VIEWPORT), "{preferred} from {anchor:?}");
            }
        }
    }

    #[test]
    fn nothing_fits_picks_most_visible() {
        // Taller than the viewport: every candidate overflows.
        let tall = Size::new(40.0, 300.0);
        let anchor = Rect::new(10.0, 20.0, 60.0, 40.0);
        let r = resolve(anchor, tall, VIEWPORT, Placement::TopStart, Offset::ZERO);
        // Below leaves 160 rows visible, above only 20.
        assert_eq!(r.placement, Placement::BottomStart);
    }
}
