// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Results of the last layout pass.

use kurbo::{Point, Rect, Size};

use crate::style::{Direction, Edges};

/// Geometry of one node as of its last layout pass.
///
/// Offsets are relative to the parent's border box. `right` and `bottom` are
/// the distances from the node's trailing edges to the parent's trailing
/// edges. All values are snapped to the configured pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComputedLayout {
    /// Offset of the left edge.
    pub left: f32,
    /// Offset of the top edge.
    pub top: f32,
    /// Distance from the right edge to the parent's right edge.
    pub right: f32,
    /// Distance from the bottom edge to the parent's bottom edge.
    pub bottom: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// Resolved reading direction.
    pub direction: Direction,
    /// Resolved margins.
    pub margin: Edges<f32>,
    /// Resolved border widths.
    pub border: Edges<f32>,
    /// Resolved padding.
    pub padding: Edges<f32>,
}

impl ComputedLayout {
    /// Border box in the parent's coordinate space.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    /// Top-left corner in the parent's coordinate space.
    pub fn origin(&self) -> Point {
        Point::new(f64::from(self.left), f64::from(self.top))
    }

    /// Border-box size.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Snap `value` to a grid of `1 / scale`; `scale == 0` leaves it untouched.
///
/// With `ceil`, values are rounded up unless they already sit on the grid,
/// so text boxes never lose space to rounding.
pub(crate) fn round_to_pixel_grid(value: f32, scale: f32, ceil: bool) -> f32 {
    if scale == 0.0 || !value.is_finite() {
        return value;
    }
    let scaled = value * scale;
    let fraction = scaled - scaled.floor();
    // Absorb float noise so 2.9999998 lands on 3 instead of ceiling to 4.
    let snapped = if fraction < 1e-4 {
        scaled.floor()
    } else if fraction > 1.0 - 1e-4 {
        scaled.ceil()
    } else if ceil {
        scaled.ceil()
    } else {
        scaled.round()
    };
    snapped / scale
}
