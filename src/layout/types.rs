//! Core geometric types for the layout engine
//!
//! All layout math is center-based: a shape is described by its center and
//! its size, and the top-left corner is derived only when drawing.

use std::ops::{Add, AddAssign, Sub};

/// A 2D point in the diagram coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// Width and height of a shape
///
/// Sizes are expected to be non-negative, but negative values are accepted
/// and simply yield degenerate rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Square size with both sides equal to `side`
    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    /// Swap width and height
    pub fn transpose(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Grow by `amount` on every side
    pub fn grown(self, amount: f64) -> Self {
        Self::new(self.width + 2.0 * amount, self.height + 2.0 * amount)
    }
}

/// An axis-aligned rectangle stored by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle centered on `center`
    pub fn from_center_and_size(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Midpoint of the top edge
    pub fn top_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    /// Check if this rectangle contains a point (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check if this rectangle strictly overlaps another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Axis along which a container lays out its elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// A piece of text positioned relative to the shape that owns it
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Bounding box of the rendered text
    pub bounds: Rect,
}

impl Label {
    /// Label whose box is centered on `center`
    pub fn centered_on(text: impl Into<String>, center: Point, text_size: Size) -> Self {
        Self {
            text: text.into(),
            bounds: Rect::from_center_and_size(center, text_size),
        }
    }

    /// Label whose box sits right above `anchor`, horizontally centered on it
    pub fn above(text: impl Into<String>, anchor: Point, text_size: Size) -> Self {
        Self {
            text: text.into(),
            bounds: Rect::new(
                anchor.x - text_size.width / 2.0,
                anchor.y - text_size.height,
                text_size.width,
                text_size.height,
            ),
        }
    }
}
