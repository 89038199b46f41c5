//! Module and finder geometry.
//!
//! Every shape the renderer draws is a rectangle with independent corner
//! radii, or a ring cut from two of them. Shapes are built in module units
//! and scaled to pixels by the painters.

use super::grid::{ModuleGrid, ModuleKind};
use crate::models::{CornerDotStyle, CornerSquareStyle, DotStyle};

/// Rectangle with per-corner radii, ordered top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
    /// Corner radii `[tl, tr, br, bl]`
    pub radii: [f32; 4],
}

impl RoundedRect {
    /// Creates a rectangle, clamping every radius to half the shorter side.
    #[must_use]
    pub fn new(x: f32, y: f32, w: f32, h: f32, radii: [f32; 4]) -> Self {
        let max = w.min(h) / 2.0;
        Self {
            x,
            y,
            w,
            h,
            radii: radii.map(|r| r.clamp(0.0, max)),
        }
    }

    /// Same rectangle with all four radii equal.
    #[must_use]
    pub fn uniform(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Self {
        Self::new(x, y, w, h, [radius; 4])
    }

    /// Scales by `factor` and then shifts by `(dx, dy)`.
    #[must_use]
    pub fn transform(&self, factor: f32, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x.mul_add(factor, dx),
            y: self.y.mul_add(factor, dy),
            w: self.w * factor,
            h: self.h * factor,
            radii: self.radii.map(|r| r * factor),
        }
    }

    /// Point-in-shape test.
    #[must_use]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let (right, bottom) = (self.x + self.w, self.y + self.h);
        if px < self.x || py < self.y || px > right || py > bottom {
            return false;
        }
        let [tl, tr, br, bl] = self.radii;
        let corners = [
            (tl, self.x + tl, self.y + tl, px < self.x + tl && py < self.y + tl),
            (tr, right - tr, self.y + tr, px > right - tr && py < self.y + tr),
            (br, right - br, bottom - br, px > right - br && py > bottom - br),
            (bl, self.x + bl, bottom - bl, px < self.x + bl && py > bottom - bl),
        ];
        corners.iter().all(|&(r, cx, cy, in_corner)| {
            !in_corner || r <= 0.0 || (px - cx).hypot(py - cy) <= r
        })
    }
}

/// Outer shape minus inner shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Outer edge
    pub outer: RoundedRect,
    /// Hole
    pub inner: RoundedRect,
}

impl Ring {
    /// Point-in-ring test.
    #[must_use]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        self.outer.contains(px, py) && !self.inner.contains(px, py)
    }

    /// Scales by `factor` and then shifts by `(dx, dy)`.
    #[must_use]
    pub fn transform(&self, factor: f32, dx: f32, dy: f32) -> Self {
        Self {
            outer: self.outer.transform(factor, dx, dy),
            inner: self.inner.transform(factor, dx, dy),
        }
    }
}

/// Outer ring of a finder pattern, relative to its top-left module.
#[must_use]
pub fn corner_square(style: CornerSquareStyle) -> Ring {
    let (outer, inner) = match style {
        CornerSquareStyle::Square => (0.0, 0.0),
        CornerSquareStyle::ExtraRounded => (2.5, 1.5),
        CornerSquareStyle::Dot => (3.5, 2.5),
    };
    Ring {
        outer: RoundedRect::uniform(0.0, 0.0, 7.0, 7.0, outer),
        inner: RoundedRect::uniform(1.0, 1.0, 5.0, 5.0, inner),
    }
}

/// Center of a finder pattern, relative to its top-left module.
#[must_use]
pub fn corner_dot(style: CornerDotStyle) -> RoundedRect {
    let radius = match style {
        CornerDotStyle::Square => 0.0,
        CornerDotStyle::Dot => 1.5,
    };
    RoundedRect::uniform(2.0, 2.0, 3.0, 3.0, radius)
}

/// Shape of the data module at `(x, y)`.
///
/// Rounded styles only round a corner when both modules sharing that
/// corner's edges are light, so runs of dark modules join up smoothly.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn data_module(style: DotStyle, grid: &ModuleGrid, x: usize, y: usize) -> RoundedRect {
    let dark = |dx: isize, dy: isize| {
        x.checked_add_signed(dx)
            .zip(y.checked_add_signed(dy))
            .is_some_and(|(nx, ny)| grid.get(nx, ny) == ModuleKind::Data)
    };
    let (top, right, bottom, left) = (dark(0, -1), dark(1, 0), dark(0, 1), dark(-1, 0));
    let free = [!top && !left, !top && !right, !bottom && !right, !bottom && !left];

    let corner = |idx: usize, radius: f32| if free[idx] { radius } else { 0.0 };
    let radii = match style {
        DotStyle::Square => [0.0; 4],
        DotStyle::Dots => [0.5; 4],
        DotStyle::Rounded => [0, 1, 2, 3].map(|i| corner(i, 0.3)),
        DotStyle::ExtraRounded => [0, 1, 2, 3].map(|i| corner(i, 0.5)),
        DotStyle::Classy => [corner(0, 0.5), 0.0, corner(2, 0.5), 0.0],
        DotStyle::ClassyRounded => [corner(0, 0.5), corner(1, 0.2), corner(2, 0.5), corner(3, 0.2)],
    };
    RoundedRect::new(x as f32, y as f32, 1.0, 1.0, radii)
}
