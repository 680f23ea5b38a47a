use super::{is_parallel, Run};
use crate::geometry::{Point, Vector};
use crate::segment::Segment;

/// Snaps groups of near-collinear segments onto one shared line each.
///
/// Two segments join a group when their angular difference stays within the
/// parallel threshold and the perpendicular offset between them (seed
/// midpoint projected onto the candidate's line) stays within
/// `ordinate_bound`. Each group's line is the length-weighted representative
/// of its members; every member's endpoints are projected onto it.
pub(crate) fn make_collinear(runs: &mut [Run], ordinate_bound: f64) {
    let n = runs.len();
    let mut group_of = vec![usize::MAX; n];
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for i in 0..n {
        if group_of[i] != usize::MAX {
            continue;
        }
        let group_index = groups.len();
        let mut group = vec![i];
        group_of[i] = group_index;

        let midpoint = runs[i].segment.barycenter();
        for j in 0..n {
            if group_of[j] != usize::MAX {
                continue;
            }
            if !is_parallel(&runs[i].segment, &runs[j].segment) {
                continue;
            }
            let projected = runs[j].segment.line().projection(&midpoint);
            if (projected - midpoint).norm() <= ordinate_bound {
                group_of[j] = group_index;
                group.push(j);
            }
        }
        groups.push(group);
    }

    for group in &groups {
        if group.len() < 2 {
            continue;
        }
        let segments: Vec<Segment> = group.iter().map(|&k| runs[k].segment).collect();
        let line = weighted_segment(&segments).line();
        for &k in group {
            let segment = &mut runs[k].segment;
            segment.source = line.projection(&segment.source);
            segment.target = line.projection(&segment.target);
        }
    }
}

/// Averages the member sources and targets into one central segment.
pub(crate) fn central_segment(segments: &[Segment]) -> Segment {
    let n = segments.len() as f64;
    let mut sx = 0.0;
    let mut sy = 0.0;
    let mut tx = 0.0;
    let mut ty = 0.0;
    for segment in segments {
        sx += segment.source.x;
        sy += segment.source.y;
        tx += segment.target.x;
        ty += segment.target.y;
    }
    Segment::from_coords(sx / n, sy / n, tx / n, ty / n)
}

/// Normalized per-member length weights.
pub(crate) fn distance_weights(segments: &[Segment]) -> Vec<f64> {
    let total: f64 = segments.iter().map(|s| s.length()).sum();
    segments.iter().map(|s| s.length() / total).collect()
}

/// Length-weighted representative of a set of near-parallel segments: the
/// central segment shifted toward the members, each pulling with its length
/// weight along the offset to its own support line.
pub(crate) fn weighted_segment(segments: &[Segment]) -> Segment {
    let weights = distance_weights(segments);
    let reference = central_segment(segments);
    let barycenter = reference.barycenter();

    let mut shift = Vector::zeros();
    for (segment, weight) in segments.iter().zip(&weights) {
        let projected = segment.line().projection(&barycenter);
        shift += (projected - barycenter) * *weight;
    }
    Segment::new(reference.source + shift, reference.target + shift)
}

/// Replaces the segment's endpoints with the extremal `points` along its own
/// direction, measured from the point cloud's barycenter.
pub(crate) fn span_segment(points: &[Point], reference: &Segment) -> Segment {
    let direction = reference.to_vector();
    let n = points.len() as f64;
    let mut center = Vector::zeros();
    for p in points {
        center += p.coords;
    }
    let center = Point::from(center / n);

    let mut min_value = f64::MAX;
    let mut max_value = f64::MIN;
    let mut p = reference.source;
    let mut q = reference.target;
    for point in points {
        let value = (point - center).dot(&direction);
        if value < min_value {
            min_value = value;
            p = *point;
        }
        if value > max_value {
            max_value = value;
            q = *point;
        }
    }
    Segment::new(p, q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_segments_snap_onto_a_shared_line() {
        let mut runs = vec![
            Run::single(Segment::from_coords(0.0, 0.0, 10.0, 0.0)),
            Run::single(Segment::from_coords(12.0, 0.2, 22.0, 0.2)),
        ];
        make_collinear(&mut runs, 0.5);

        // Both now lie on one horizontal line between y=0 and y=0.2,
        // weighted by equal lengths.
        let y0 = runs[0].segment.source.y;
        let y1 = runs[1].segment.source.y;
        assert!((y0 - y1).abs() < 1e-9);
        assert!((y0 - 0.1).abs() < 1e-9);
        assert!(runs[0].segment.orientation().abs() < 1e-9);
    }

    #[test]
    fn distant_segments_stay_apart() {
        let mut runs = vec![
            Run::single(Segment::from_coords(0.0, 0.0, 10.0, 0.0)),
            Run::single(Segment::from_coords(0.0, 5.0, 10.0, 5.0)),
        ];
        make_collinear(&mut runs, 0.5);
        assert!((runs[0].segment.source.y - 0.0).abs() < 1e-12);
        assert!((runs[1].segment.source.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn weighted_segment_leans_toward_the_longer_member() {
        let long = Segment::from_coords(0.0, 0.0, 30.0, 0.0);
        let short = Segment::from_coords(0.0, 1.0, 10.0, 1.0);
        let rep = weighted_segment(&[long, short]);
        // Weights 3/4 and 1/4: the representative sits at y = 0.25.
        assert!((rep.source.y - 0.25).abs() < 1e-9);
        assert!((rep.target.y - 0.25).abs() < 1e-9);
    }

    #[test]
    fn span_segment_picks_the_extremes() {
        let reference = Segment::from_coords(0.0, 0.0, 1.0, 0.0);
        let points = vec![
            Point::new(3.0, 0.0),
            Point::new(-2.0, 0.0),
            Point::new(1.0, 0.0),
        ];
        let span = span_segment(&points, &reference);
        assert!((span.source.x + 2.0).abs() < 1e-12);
        assert!((span.target.x - 3.0).abs() < 1e-12);
    }
}
