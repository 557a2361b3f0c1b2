use crate::Vector;
use crate::geom::EPS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0., 0., 0.)
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.z - other.z).abs() < EPS
    }

    /// Like `is_close()` but with a caller-provided tolerance.
    pub fn is_close_tol(&self, other: &Self, tol: f64) -> bool {
        (self.x - other.x).abs() < tol
            && (self.y - other.y).abs() < tol
            && (self.z - other.z).abs() < tol
    }

    /// Arithmetic mean of the points. Returns the origin for an empty slice.
    pub fn average(pts: &[Self]) -> Self {
        if pts.is_empty() {
            return Self::origin();
        }
        let n = pts.len() as f64;
        let (sx, sy, sz) = pts
            .iter()
            .fold((0., 0., 0.), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
        Self::new(sx / n, sy / n, sz / n)
    }
}

impl From<[f64; 3]> for Point {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Point> for [f64; 3] {
    fn from(p: Point) -> Self {
        [p.x, p.y, p.z]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Point({:.prec$}, {:.prec$}, {:.prec$})",
            self.x,
            self.y,
            self.z,
            prec = prec
        )
    }
}

// Point + Vector -> Point
impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
            z: self.z + other.dz,
        }
    }
}

// Point - Vector -> Point
impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, other: Vector) -> Self {
        Self {
            x: self.x - other.dx,
            y: self.y - other.dy,
            z: self.z - other.dz,
        }
    }
}

// Point - Point -> Vector
impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Self) -> Vector {
        Vector::from_points(other, self)
    }
}
