use crate::geometry::Point;
use crate::segment::Segment;

/// Sample point tagged with its owning segment index.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SamplePoint {
    pub position: Point,
    pub segment: usize,
}

/// Samples every segment at a regular spacing into a flat point list.
///
/// A segment shorter than the spacing (including degenerate ones) still
/// contributes both endpoints, so every segment is represented in the
/// triangulation.
pub(crate) fn sample_segments(segments: &[Segment], spacing: f64) -> Vec<SamplePoint> {
    debug_assert!(spacing > 0.0);

    let mut samples = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let length = segment.length();
        let count = ((length / spacing).floor() as usize + 1).max(2);
        let step = 1.0 / (count - 1) as f64;
        for k in 0..count {
            let t = k as f64 * step;
            let position = Point::new(
                segment.source.x + (segment.target.x - segment.source.x) * t,
                segment.source.y + (segment.target.y - segment.source.y) * t,
            );
            samples.push(SamplePoint {
                position,
                segment: index,
            });
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_segment_keeps_both_endpoints() {
        let segments = vec![Segment::from_coords(1.0, 1.0, 1.0, 1.0)];
        let samples = sample_segments(&segments, 2.0);
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().all(|s| s.segment == 0));
    }

    #[test]
    fn spacing_controls_sample_count() {
        let segments = vec![Segment::from_coords(0.0, 0.0, 10.0, 0.0)];
        let samples = sample_segments(&segments, 2.0);
        // 10 / 2 = 5 intervals -> 6 points from source to target.
        assert_eq!(samples.len(), 6);
        let first = samples.first().unwrap().position;
        let last = samples.last().unwrap().position;
        assert!((first.x - 0.0).abs() < 1e-12);
        assert!((last.x - 10.0).abs() < 1e-12);
    }
}
