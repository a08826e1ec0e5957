// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preferred placements and their fallback order.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Side of the anchor the floating box sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
}

/// Edge of the anchor the floating box lines up with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Leading edges line up (left in a left-to-right layout).
    Start,
    /// Trailing edges line up.
    End,
}

/// Preferred placement of a floating box relative to its anchor.
///
/// The actual placement may differ: engines flip to a fallback when the preferred placement
/// would overflow the viewport. See [`Placement::fallbacks`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Below the anchor, leading edges aligned.
    #[default]
    BottomStart,
    /// Below the anchor, trailing edges aligned.
    BottomEnd,
    /// Above the anchor, leading edges aligned.
    TopStart,
    /// Above the anchor, trailing edges aligned.
    TopEnd,
}

impl Placement {
    /// All placements, in declaration order.
    pub const ALL: [Self; 4] = [Self::BottomStart, Self::BottomEnd, Self::TopStart, Self::TopEnd];

    /// Build a placement from its side and alignment.
    pub const fn new(side: Side, align: Align) -> Self {
        match (side, align) {
            (Side::Bottom, Align::Start) => Self::BottomStart,
            (Side::Bottom, Align::End) => Self::BottomEnd,
            (Side::Top, Align::Start) => Self::TopStart,
            (Side::Top, Align::End) => Self::TopEnd,
        }
    }

    /// The side of the anchor this placement uses.
    pub const fn side(self) -> Side {
        match self {
            Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::TopStart | Self::TopEnd => Side::Top,
        }
    }

    /// The alignment this placement uses.
    pub const fn align(self) -> Align {
        match self {
            Self::BottomStart | Self::TopStart => Align::Start,
            Self::BottomEnd | Self::TopEnd => Align::End,
        }
    }

    /// Same alignment, opposite side (`bottom-start` ↔ `top-start`).
    pub const fn flip_vertical(self) -> Self {
        let side = match self.side() {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        };
        Self::new(side, self.align())
    }

    /// Same side, opposite alignment (`bottom-start` ↔ `bottom-end`).
    pub const fn flip_horizontal(self) -> Self {
        let align = match self.align() {
            Align::Start => Align::End,
            Align::End => Align::Start,
        };
        Self::new(self.side(), align)
    }

    /// Candidates in the order engines try them.
    ///
    /// The preferred placement comes first, then the vertical flip, then the horizontal flip,
    /// then both. Every placement appears exactly once.
    pub const fn fallbacks(self) -> [Self; 4] {
        [
            self,
            self.flip_vertical(),
            self.flip_horizontal(),
            self.flip_vertical().flip_horizontal(),
        ]
    }

    /// The kebab-case name of this placement.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized placement name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement `{input}`, expected one of bottom-start, bottom-end, top-start, top-end")]
pub struct ParsePlacementError {
    input: String,
}

impl ParsePlacementError {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| ParsePlacementError { input: s.into() })
    }
}
