//! Math utilities and types
//!
//! Float vectors come from nalgebra; integer points and rectangles are the
//! pixel-snapped geometry used for hit testing and viewport arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// RGBA color with components in `0.0..=1.0`
pub type Color = Vec4;

/// Commonly used colors
pub mod colors {
    use super::Color;

    /// Opaque white, the neutral tint
    pub fn white() -> Color {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Opaque black
    pub fn black() -> Color {
        Color::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Warm yellow used for highlighted buttons
    pub fn gold() -> Color {
        Color::new(1.0, 0.84, 0.0, 1.0)
    }

    /// Fully transparent
    pub fn transparent() -> Color {
        Color::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate (grows downward)
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Convert to a float vector
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Snap a float position to the pixel grid (componentwise floor)
pub fn snap(position: Vec2) -> Point {
    Point::new(position.x.floor() as i32, position.y.floor() as i32)
}

/// Axis-aligned integer rectangle
///
/// Containment is half-open: the left and top edges are inside, the right
/// and bottom edges are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a location and a size
    pub const fn from_parts(location: Point, size: Point) -> Self {
        Self::new(location.x, location.y, size.x, size.y)
    }

    /// Empty rectangle at the origin
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Top-left corner
    pub const fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height as a point
    pub const fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Integer center point
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// True when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Same size, moved to `location`
    pub const fn with_location(&self, location: Point) -> Self {
        Self::new(location.x, location.y, self.width, self.height)
    }

    /// Same size, moved by `delta`
    pub const fn offset(&self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Check if the point lies inside the rectangle
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Check if two rectangles overlap by at least one pixel
    pub const fn intersects(&self, other: &Self) -> bool {
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(10, 10, 20, 20);

        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(29, 29)));
        assert!(!rect.contains(Point::new(30, 10)));
        assert!(!rect.contains(Point::new(10, 30)));
        assert!(!rect.contains(Point::new(9, 15)));
    }

    #[test]
    fn test_intersects_requires_overlap() {
        let a = Rect::new(0, 0, 32, 32);

        assert!(a.intersects(&Rect::new(31, 31, 10, 10)));
        // Touching edges do not overlap
        assert!(!a.intersects(&Rect::new(32, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 32, 10, 10)));
        assert!(a.intersects(&Rect::new(-5, -5, 100, 100)));
    }

    #[test]
    fn test_center_and_snap() {
        assert_eq!(Rect::new(0, 0, 100, 50).center(), Point::new(50, 25));
        assert_eq!(snap(Vec2::new(12.9, -0.5)), Point::new(12, -1));
    }
}
