//! Thin geometry-kernel layer over nalgebra.
//!
//! Only the constructions the pipeline needs: normalized support lines,
//! projections, line-line intersection and rotation about a pivot. Exact
//! arithmetic is out of scope; everything is f64.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

pub type Point = Point2<f64>;
pub type Vector = Vector2<f64>;

const EPS: f64 = 1e-12;

/// Line in normal form `ax + by + c = 0` with `sqrt(a^2 + b^2) = 1`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Result of intersecting two lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineIntersection {
    /// Unique intersection point.
    Point(Point),
    /// The lines coincide.
    Coincident,
    /// Parallel and distinct.
    None,
}

impl Line {
    pub fn from_points(p: &Point, q: &Point) -> Self {
        let a = q.y - p.y;
        let b = p.x - q.x;
        let c = q.x * p.y - p.x * q.y;
        let norm = (a * a + b * b).sqrt().max(EPS);
        Self {
            a: a / norm,
            b: b / norm,
            c: c / norm,
        }
    }

    /// Signed distance from the point to the line.
    #[inline]
    pub fn signed_distance(&self, p: &Point) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    /// Orthogonal projection of the point onto the line.
    pub fn projection(&self, p: &Point) -> Point {
        let d = self.signed_distance(p);
        Point::new(p.x - d * self.a, p.y - d * self.b)
    }

    /// Intersects two normalized lines.
    pub fn intersection(&self, other: &Line) -> LineIntersection {
        let det = self.a * other.b - other.a * self.b;
        if det.abs() < EPS {
            // Same line up to sign of the normal form.
            let same = (self.c - other.c).abs() < EPS || (self.c + other.c).abs() < EPS;
            if same {
                LineIntersection::Coincident
            } else {
                LineIntersection::None
            }
        } else {
            let x = (self.b * other.c - other.b * self.c) / det;
            let y = (other.a * self.c - self.a * other.c) / det;
            LineIntersection::Point(Point::new(x, y))
        }
    }
}

/// Rotates `p` counterclockwise by `angle_deg` degrees about `pivot`.
pub fn rotate_about(pivot: &Point, angle_deg: f64, p: &Point) -> Point {
    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    Point::new(
        pivot.x + dx * cos - dy * sin,
        pivot.y + dx * sin + dy * cos,
    )
}
