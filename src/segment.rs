//! Segment and contour data model.
//!
//! Segments are identified by their index into the flattened input
//! collection; every internal map and graph references them by index, never
//! by pointer, so they can be copied and mutated freely across stages.

use crate::angle::normalize_deg_180;
use crate::geometry::{Line, Point, Vector};
use serde::{Deserialize, Serialize};

/// Oriented line segment with source and target points.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub source: Point,
    pub target: Point,
}

impl Segment {
    pub fn new(source: Point, target: Point) -> Self {
        Self { source, target }
    }

    pub fn from_coords(sx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self::new(Point::new(sx, sy), Point::new(tx, ty))
    }

    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.target - self.source
    }

    #[inline]
    pub fn squared_length(&self) -> f64 {
        self.to_vector().norm_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.to_vector().norm()
    }

    pub fn barycenter(&self) -> Point {
        Point::new(
            (self.source.x + self.target.x) * 0.5,
            (self.source.y + self.target.y) * 0.5,
        )
    }

    /// Orientation angle in degrees, in [0, 180).
    pub fn orientation(&self) -> f64 {
        let v = self.to_vector();
        normalize_deg_180(v.y.atan2(v.x).to_degrees())
    }

    /// Supporting line in normal form.
    pub fn line(&self) -> Line {
        Line::from_points(&self.source, &self.target)
    }
}

/// Ordered run of segments forming an open or closed polyline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contour {
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Contour {
    pub fn closed(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            closed: true,
        }
    }

    pub fn open(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            closed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Length statistics over a segment collection, used to separate long
/// (direction-defining) segments from short ones.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LengthStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl LengthStats {
    pub fn compute(segments: &[Segment]) -> Self {
        if segments.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }
        let n = segments.len() as f64;
        let mean = segments.iter().map(|s| s.length()).sum::<f64>() / n;
        let var = segments
            .iter()
            .map(|s| {
                let d = s.length() - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        Self {
            mean,
            std_dev: var.sqrt(),
        }
    }

    /// Threshold above which a segment counts as long: mean plus one
    /// standard deviation.
    #[inline]
    pub fn long_threshold(&self) -> f64 {
        self.mean + self.std_dev
    }
}
