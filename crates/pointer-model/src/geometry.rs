//! Points and bounding boxes in device-independent pixels.

use serde::{Deserialize, Serialize};

/// A 2D point in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let (dx, dy) = self.delta_to(other);
        (dx * dx + dy * dy).sqrt()
    }

    /// Per-axis displacement from `self` to `other`.
    pub fn delta_to(&self, other: &Point2D) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }
}

/// An axis-aligned bounding box grown one point at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Zero-sized bounds at a single point.
    pub fn from_point(point: Point2D) -> Self {
        Self {
            left: point.x,
            top: point.y,
            right: point.x,
            bottom: point.y,
        }
    }

    /// Smallest bounds containing every point, or `None` when there are none.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(*points.next()?);
        for point in points {
            bounds.include(*point);
        }
        Some(bounds)
    }

    /// Grow the bounds to contain `point`.
    pub fn include(&mut self, point: Point2D) {
        self.left = self.left.min(point.x);
        self.top = self.top.min(point.y);
        self.right = self.right.max(point.x);
        self.bottom = self.bottom.max(point.y);
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f64 {
        let w = self.width();
        let h = self.height();
        (w * w + h * h).sqrt()
    }
}
