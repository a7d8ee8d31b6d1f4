//! Core geometry types: Offset, Size, Region, Spacing, and the logical
//! canvas used to convert between screen pixels and size-independent
//! theme units.
//!
//! Theme scripts express lengths in a fixed 120x90 logical coordinate
//! system so the same theme scales to any output size. Conversions in
//! both directions use ceiling rounding: round-tripping a size through
//! screen -> logical -> screen never shrinks it below the original.

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement in screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in screen pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { x: 0, y: 0, width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular region in screen pixels defined by position and size.
///
/// This is the geometry tuple threaded through the pre-draw hook chain:
/// each hook receives a region and returns a possibly-adjusted one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Translate the region by an [`Offset`].
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region { x: self.x + offset.x, y: self.y + offset.y, width: self.width, height: self.height }
    }

    /// Expand the region outward by the given [`Spacing`].
    #[inline]
    pub const fn grow(self, spacing: Spacing) -> Region {
        Region {
            x: self.x - spacing.left,
            y: self.y - spacing.top,
            width: self.width + spacing.left + spacing.right,
            height: self.height + spacing.top + spacing.bottom,
        }
    }

    /// Contract the region inward by the given [`Spacing`].
    ///
    /// Width and height are clamped to zero to avoid negative dimensions.
    #[inline]
    pub const fn shrink(self, spacing: Spacing) -> Region {
        let w = self.width - spacing.left - spacing.right;
        let h = self.height - spacing.top - spacing.bottom;
        Region {
            x: self.x + spacing.left,
            y: self.y + spacing.top,
            width: if w > 0 { w } else { 0 },
            height: if h > 0 { h } else { 0 },
        }
    }

    /// Move the left edge right by `amount`, clamping the width at zero.
    #[inline]
    pub const fn indent(self, amount: i32) -> Region {
        let w = self.width - amount;
        Region {
            x: self.x + amount,
            y: self.y,
            width: if w > 0 { w } else { 0 },
            height: self.height,
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle, used for margin and padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }
}

impl Add for Spacing {
    type Output = Spacing;
    #[inline]
    fn add(self, rhs: Spacing) -> Spacing {
        Spacing {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

// ---------------------------------------------------------------------------
// LogicalCanvas
// ---------------------------------------------------------------------------

/// Logical coordinate system width in theme units.
pub const LOGICAL_WIDTH: i32 = 120;

/// Logical coordinate system height in theme units.
pub const LOGICAL_HEIGHT: i32 = 90;

/// Ceiling division for positive divisors. Widened to i64 so the
/// `length * dimension` products the conversions feed in cannot
/// overflow for any pair of i32 operands.
#[inline]
const fn div_ceil(a: i64, b: i64) -> i64 {
    (a + b - 1).div_euclid(b)
}

/// Clamp a widened conversion result back into pixel range.
#[inline]
const fn saturate(v: i64) -> i32 {
    if v > i32::MAX as i64 {
        i32::MAX
    } else if v < i32::MIN as i64 {
        i32::MIN
    } else {
        v as i32
    }
}

/// Converts between screen pixels and the 120x90 logical unit space.
///
/// Both directions round up, so `screen_w(logical_w(s)) >= s` for any
/// positive `s`: a theme author asking for "at least this big" never
/// loses a pixel to rounding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LogicalCanvas {
    screen: Size,
}

impl LogicalCanvas {
    /// Create a logical canvas over the given screen size.
    ///
    /// Screen dimensions must be positive.
    pub fn new(screen: Size) -> Self {
        debug_assert!(screen.width > 0 && screen.height > 0, "screen size must be positive");
        Self { screen }
    }

    /// The underlying screen size.
    #[inline]
    pub const fn screen(self) -> Size {
        self.screen
    }

    /// Convert a horizontal length from logical units to screen pixels.
    ///
    /// Saturates at the i32 range; scripts can name arbitrarily large
    /// lengths and a conversion must not panic on them.
    #[inline]
    pub const fn screen_w(self, logical: i32) -> i32 {
        saturate(div_ceil(logical as i64 * self.screen.width as i64, LOGICAL_WIDTH as i64))
    }

    /// Convert a vertical length from logical units to screen pixels.
    #[inline]
    pub const fn screen_h(self, logical: i32) -> i32 {
        saturate(div_ceil(logical as i64 * self.screen.height as i64, LOGICAL_HEIGHT as i64))
    }

    /// Convert a horizontal length from screen pixels to logical units.
    #[inline]
    pub const fn logical_w(self, screen: i32) -> i32 {
        saturate(div_ceil(screen as i64 * LOGICAL_WIDTH as i64, self.screen.width as i64))
    }

    /// Convert a vertical length from screen pixels to logical units.
    #[inline]
    pub const fn logical_h(self, screen: i32) -> i32 {
        saturate(div_ceil(screen as i64 * LOGICAL_HEIGHT as i64, self.screen.height as i64))
    }

    /// Convert a size from logical units to screen pixels.
    #[inline]
    pub const fn screen_size(self, logical: Size) -> Size {
        Size { width: self.screen_w(logical.width), height: self.screen_h(logical.height) }
    }

    /// Convert a size from screen pixels to logical units.
    #[inline]
    pub const fn logical_size(self, screen: Size) -> Size {
        Size { width: self.logical_w(screen.width), height: self.logical_h(screen.height) }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Offset / Size
    // -----------------------------------------------------------------------

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(1, 2);
        let b = Offset::new(3, 4);
        assert_eq!(a + b, Offset::new(4, 6));
        assert_eq!(b - a, Offset::new(2, 2));
        assert_eq!(-a, Offset::new(-1, -2));
    }

    #[test]
    fn size_to_region() {
        assert_eq!(Size::new(800, 600).to_region(), Region::new(0, 0, 800, 600));
        assert_eq!(Size::ZERO, Size::default());
    }

    // -----------------------------------------------------------------------
    // Region
    // -----------------------------------------------------------------------

    #[test]
    fn region_edges() {
        let r = Region::new(5, 10, 20, 30);
        assert_eq!(r.right(), 25);
        assert_eq!(r.bottom(), 40);
        assert_eq!(r.offset(), Offset::new(5, 10));
        assert_eq!(r.size(), Size::new(20, 30));
    }

    #[test]
    fn region_translate() {
        let r = Region::new(5, 10, 20, 30);
        assert_eq!(r.translate(Offset::new(-5, 3)), Region::new(0, 13, 20, 30));
    }

    #[test]
    fn region_grow_shrink_roundtrip() {
        let r = Region::new(10, 10, 40, 30);
        let s = Spacing::new(2, 3, 4, 5);
        assert_eq!(r.grow(s).shrink(s), r);
    }

    #[test]
    fn region_shrink_clamps_to_zero() {
        let r = Region::new(5, 5, 4, 4);
        let shrunk = r.shrink(Spacing::all(10));
        assert_eq!(shrunk.width, 0);
        assert_eq!(shrunk.height, 0);
    }

    #[test]
    fn region_indent() {
        let r = Region::new(10, 0, 50, 20);
        assert_eq!(r.indent(15), Region::new(25, 0, 35, 20));
    }

    #[test]
    fn region_indent_clamps_width() {
        let r = Region::new(0, 0, 10, 20);
        let indented = r.indent(100);
        assert_eq!(indented.x, 100);
        assert_eq!(indented.width, 0);
    }

    // -----------------------------------------------------------------------
    // Spacing
    // -----------------------------------------------------------------------

    #[test]
    fn spacing_constructors() {
        assert_eq!(Spacing::new(1, 2, 3, 4), Spacing { top: 1, right: 2, bottom: 3, left: 4 });
        assert_eq!(Spacing::all(5), Spacing { top: 5, right: 5, bottom: 5, left: 5 });
        assert_eq!(Spacing::ZERO, Spacing::default());
    }

    #[test]
    fn spacing_extents() {
        let s = Spacing::new(1, 2, 3, 4);
        assert_eq!(s.width(), 6);
        assert_eq!(s.height(), 4);
    }

    #[test]
    fn spacing_add() {
        assert_eq!(
            Spacing::new(1, 2, 3, 4) + Spacing::new(10, 20, 30, 40),
            Spacing::new(11, 22, 33, 44),
        );
    }

    // -----------------------------------------------------------------------
    // LogicalCanvas
    // -----------------------------------------------------------------------

    #[test]
    fn logical_conversion_exact_multiple() {
        // 1200x900 screen: exactly 10 pixels per logical unit.
        let lc = LogicalCanvas::new(Size::new(1200, 900));
        assert_eq!(lc.screen_w(12), 120);
        assert_eq!(lc.screen_h(9), 90);
        assert_eq!(lc.logical_w(120), 12);
        assert_eq!(lc.logical_h(90), 9);
    }

    #[test]
    fn logical_conversion_rounds_up() {
        // 800x600 screen: 1 logical unit = 800/120 = 6.67px, ceil to 7.
        let lc = LogicalCanvas::new(Size::new(800, 600));
        assert_eq!(lc.screen_w(1), 7);
        assert_eq!(lc.screen_h(1), 7); // 600/90 = 6.67
    }

    #[test]
    fn roundtrip_never_shrinks() {
        let lc = LogicalCanvas::new(Size::new(1024, 768));
        for s in 1..=500 {
            let rt = lc.screen_w(lc.logical_w(s));
            assert!(rt >= s, "width {s} shrank to {rt} through round-trip");
            let rt = lc.screen_h(lc.logical_h(s));
            assert!(rt >= s, "height {s} shrank to {rt} through round-trip");
        }
    }

    #[test]
    fn roundtrip_size_never_shrinks() {
        let lc = LogicalCanvas::new(Size::new(1366, 768));
        let s = Size::new(333, 77);
        let rt = lc.screen_size(lc.logical_size(s));
        assert!(rt.width >= s.width);
        assert!(rt.height >= s.height);
    }

    #[test]
    fn zero_converts_to_zero() {
        let lc = LogicalCanvas::new(Size::new(800, 600));
        assert_eq!(lc.screen_w(0), 0);
        assert_eq!(lc.logical_w(0), 0);
    }

    #[test]
    fn div_ceil_behavior() {
        assert_eq!(div_ceil(10, 3), 4);
        assert_eq!(div_ceil(9, 3), 3);
        assert_eq!(div_ceil(0, 3), 0);
        assert_eq!(div_ceil(1, 3), 1);
    }

    #[test]
    fn huge_lengths_convert_without_panicking() {
        let lc = LogicalCanvas::new(Size::new(1200, 900));
        // 2_000_000 * 1200 exceeds i32 but the exact result still fits.
        assert_eq!(lc.screen_w(2_000_000), 20_000_000);
        assert_eq!(lc.screen_h(2_000_000), 20_000_000);
        // When even the result would not fit, the conversion saturates.
        assert_eq!(lc.screen_w(i32::MAX), i32::MAX);
        let tiny = LogicalCanvas::new(Size::new(2, 2));
        assert_eq!(tiny.logical_w(i32::MAX), i32::MAX);
        assert_eq!(tiny.logical_w(i32::MIN), i32::MIN);
    }
}
