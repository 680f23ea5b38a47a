use super::Run;
use crate::geometry::{Line, LineIntersection};
use crate::segment::Segment;

/// Moves each run's endpoints to the intersections of its support line with
/// the neighboring runs' support lines, recovering sharp corners.
///
/// Coincident or near-parallel neighbor lines leave the endpoint where it
/// is. The first and last runs of an open contour keep their outer
/// endpoints.
pub(crate) fn intersect_runs(runs: &mut [Run], closed: bool) {
    let n = runs.len();
    if n < 2 {
        return;
    }
    let lines: Vec<Line> = runs.iter().map(|run| run.segment.line()).collect();

    let mut corrected = Vec::with_capacity(n);
    for i in 0..n {
        let segment = &runs[i].segment;
        let mut source = segment.source;
        let mut target = segment.target;

        if closed || i > 0 {
            let prev = (i + n - 1) % n;
            if let LineIntersection::Point(p) = lines[prev].intersection(&lines[i]) {
                source = p;
            }
        }
        if closed || i + 1 < n {
            let next = (i + 1) % n;
            if let LineIntersection::Point(p) = lines[i].intersection(&lines[next]) {
                target = p;
            }
        }
        corrected.push(Segment::new(source, target));
    }

    for (run, segment) in runs.iter_mut().zip(corrected) {
        run.segment = segment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(x0: f64, y0: f64, x1: f64, y1: f64) -> Run {
        Run::single(Segment::from_coords(x0, y0, x1, y1))
    }

    #[test]
    fn shrunken_square_sides_regain_their_corners() {
        let mut runs = vec![
            run(1.0, 0.0, 9.0, 0.0),
            run(10.0, 1.0, 10.0, 9.0),
            run(9.0, 10.0, 1.0, 10.0),
            run(0.0, 9.0, 0.0, 1.0),
        ];
        intersect_runs(&mut runs, true);
        assert!((runs[0].segment.source - nalgebra::Point2::new(0.0, 0.0)).norm() < 1e-9);
        assert!((runs[0].segment.target - nalgebra::Point2::new(10.0, 0.0)).norm() < 1e-9);
        assert!((runs[2].segment.source - nalgebra::Point2::new(10.0, 10.0)).norm() < 1e-9);
        assert!((runs[3].segment.target - nalgebra::Point2::new(0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn open_contour_keeps_its_outer_endpoints() {
        let mut runs = vec![
            run(0.0, 0.0, 9.0, 0.0),
            run(10.0, 1.0, 10.0, 9.0),
            run(9.0, 10.0, 0.0, 10.0),
        ];
        intersect_runs(&mut runs, false);
        assert!((runs[0].segment.source - nalgebra::Point2::new(0.0, 0.0)).norm() < 1e-12);
        assert!((runs[0].segment.target - nalgebra::Point2::new(10.0, 0.0)).norm() < 1e-9);
        assert!((runs[2].segment.target - nalgebra::Point2::new(0.0, 10.0)).norm() < 1e-12);
    }

    #[test]
    fn parallel_neighbors_leave_the_endpoint_in_place() {
        let mut runs = vec![
            run(0.0, 0.0, 10.0, 0.0),
            run(12.0, 0.0, 20.0, 0.0),
            run(20.0, 0.0, 20.0, 10.0),
            run(20.0, 10.0, 0.0, 10.0),
        ];
        intersect_runs(&mut runs, true);
        // Runs 0 and 1 share a support line: both endpoints at the seam
        // stay put.
        assert!((runs[0].segment.target.x - 10.0).abs() < 1e-12);
        assert!((runs[1].segment.source.x - 12.0).abs() < 1e-12);
    }
}
