//! Planar geometry for tessa.
//!
//! This module provides the [`Point`] type shared by the input model, the
//! domain classifier and the label repair scan, plus the predicates in
//! [`predicates`].

pub mod predicates;

use std::ops::{Add, Mul, Sub};

/// A 2-D coordinate (also used as a vector).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// z-component of the 3-D cross product of `self` and `other`.
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length, treating the point as a vector.
    #[inline]
    pub fn length2(self) -> f64 {
        self.dot(self)
    }

    /// True when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<spade::Point2<f64>> for Point {
    fn from(p: spade::Point2<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for spade::Point2<f64> {
    fn from(p: Point) -> Self {
        spade::Point2::new(p.x, p.y)
    }
}
