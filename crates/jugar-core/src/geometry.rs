//! Geometric primitives: [`Point`], [`Size`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point in CSS pixels, used for viewport offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size in whole device pixels.
///
/// Canvas dimensions are integral: the rendering target's width and height
/// attributes are `u32`, so this is not the fractional CSS size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a size from a `[width, height]` pair.
    #[must_use]
    pub const fn from_dimensions(dimensions: [u32; 2]) -> Self {
        Self {
            width: dimensions[0],
            height: dimensions[1],
        }
    }

    /// Check whether either dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_new() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.x, 3.0);
        assert_eq!(p.y, 4.0);
    }

    #[test]
    fn test_point_default_is_origin() {
        assert_eq!(Point::default(), Point::ORIGIN);
    }

    #[test]
    fn test_point_add_sub() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 5.0);
        assert_eq!(a + b, Point::new(4.0, 7.0));
        assert_eq!(b - a, Point::new(2.0, 3.0));
    }

    #[test]
    fn test_size_from_dimensions() {
        let s = Size::from_dimensions([640, 480]);
        assert_eq!(s.width, 640);
        assert_eq!(s.height, 480);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(100, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn test_size_serde_round_trip() {
        let s = Size::new(800, 600);
        let json = serde_json::to_string(&s).unwrap();
        let back: Size = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    proptest! {
        #[test]
        fn prop_point_add_commutes(x in -1e6f32..1e6, y in -1e6f32..1e6) {
            let p = Point::new(x, y);
            let q = Point::new(y, x);
            prop_assert_eq!(p + q, q + p);
        }

        #[test]
        fn prop_point_origin_is_identity(x in -1e6f32..1e6, y in -1e6f32..1e6) {
            let p = Point::new(x, y);
            prop_assert_eq!(p + Point::ORIGIN, p);
            prop_assert_eq!(p - Point::ORIGIN, p);
        }

        #[test]
        fn prop_size_dimensions_round_trip(w in 0u32..=8192, h in 0u32..=8192) {
            let s = Size::from_dimensions([w, h]);
            prop_assert_eq!([s.width, s.height], [w, h]);
        }
    }
}
