use super::collinear::{span_segment, weighted_segment};
use super::{is_parallel, Rejection, Run, ZERO_LENGTH_SQ};
use crate::segment::Segment;

/// Drops degenerate segments and merges maximal runs of consecutive
/// parallel segments into single runs, recording each constituent's share
/// so the merged run can be split back later.
///
/// Closed contours start the walk at a corner so a parallel run never
/// straddles the seam. A contour left with fewer than four runs cannot form
/// a polygon and is rejected.
pub(crate) fn clean(runs: Vec<Run>, closed: bool) -> Result<Vec<Run>, Rejection> {
    let runs: Vec<Run> = runs
        .into_iter()
        .filter(|run| run.segment.squared_length() > ZERO_LENGTH_SQ)
        .collect();
    if runs.len() < 4 {
        return Err(Rejection::TooFewSegments {
            survivors: runs.len(),
        });
    }

    let groups = if closed {
        group_cyclic(&runs)?
    } else {
        group_linear(&runs)
    };
    Ok(groups
        .into_iter()
        .map(|group| merge_group(&runs, &group))
        .collect())
}

/// First index whose predecessor is not parallel to it. Falls back to zero
/// when the contour has no such corner.
fn find_initial_index(runs: &[Run]) -> usize {
    let n = runs.len();
    for i in 0..n {
        let prev = &runs[(i + n - 1) % n];
        if !is_parallel(&prev.segment, &runs[i].segment) {
            return i;
        }
    }
    0
}

fn group_cyclic(runs: &[Run]) -> Result<Vec<Vec<usize>>, Rejection> {
    let n = runs.len();
    let start = find_initial_index(runs);
    let mut groups = Vec::new();
    let mut i = start;
    let mut visited = 0;
    while visited < n {
        let mut group = vec![i];
        let mut last = i;
        loop {
            // A contour with no corner at all keeps extending the same run
            // around the ring forever.
            if group.len() >= 2 * n {
                return Err(Rejection::WalkOverflow);
            }
            let next = (last + 1) % n;
            if !is_parallel(&runs[last].segment, &runs[next].segment) {
                break;
            }
            group.push(next);
            last = next;
        }
        visited += group.len();
        i = (last + 1) % n;
        groups.push(group);
    }
    Ok(groups)
}

fn group_linear(runs: &[Run]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in 0..runs.len() {
        match groups.last_mut() {
            Some(group) => {
                let last = group[group.len() - 1];
                if is_parallel(&runs[last].segment, &runs[i].segment) {
                    group.push(i);
                } else {
                    groups.push(vec![i]);
                }
            }
            None => groups.push(vec![i]),
        }
    }
    groups
}

fn merge_group(runs: &[Run], group: &[usize]) -> Run {
    if group.len() == 1 {
        return runs[group[0]].clone();
    }
    let segments: Vec<Segment> = group.iter().map(|&k| runs[k].segment).collect();
    let reference = weighted_segment(&segments);
    let line = reference.line();

    let mut points = Vec::with_capacity(2 * segments.len());
    for segment in &segments {
        points.push(line.projection(&segment.source));
        points.push(line.projection(&segment.target));
    }
    let merged = span_segment(&points, &reference);
    let boundaries = compose_boundaries(runs, group, merged.length());
    Run {
        segment: merged,
        boundaries,
    }
}

/// Cumulative split fractions of the merged run. Gaps or overlaps between
/// the constituents leave the raw shares short of (or past) one; the
/// discrepancy is spread evenly across the pieces so the last boundary
/// lands exactly at one.
fn compose_boundaries(runs: &[Run], group: &[usize], merged_length: f64) -> Vec<f64> {
    let mut piece_lengths = Vec::new();
    for &k in group {
        let run = &runs[k];
        let length = run.segment.length();
        for pair in run.boundaries.windows(2) {
            piece_lengths.push((pair[1] - pair[0]) * length);
        }
    }
    let total: f64 = piece_lengths.iter().sum();
    let error = (1.0 - total / merged_length) / piece_lengths.len() as f64;

    let mut boundaries = Vec::with_capacity(piece_lengths.len() + 1);
    boundaries.push(0.0);
    let mut cumulative = 0.0;
    for (k, length) in piece_lengths.iter().enumerate() {
        cumulative += length;
        boundaries.push(cumulative / merged_length + (k + 1) as f64 * error);
    }
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(x0: f64, y0: f64, x1: f64, y1: f64) -> Run {
        Run::single(Segment::from_coords(x0, y0, x1, y1))
    }

    #[test]
    fn zero_length_segments_are_dropped() {
        let runs = vec![
            run(0.0, 0.0, 10.0, 0.0),
            run(10.0, 0.0, 10.0, 10.0),
            run(10.0, 10.0, 10.0, 10.0),
            run(10.0, 10.0, 0.0, 10.0),
            run(0.0, 10.0, 0.0, 0.0),
        ];
        let cleaned = clean(runs, true).expect("four sides survive");
        assert_eq!(cleaned.len(), 4);
    }

    #[test]
    fn parallel_run_straddling_the_seam_is_merged() {
        // A square whose bottom edge is listed in two pieces at the ends of
        // the vector, so the run wraps the seam.
        let runs = vec![
            run(4.0, 0.0, 10.0, 0.0),
            run(10.0, 0.0, 10.0, 10.0),
            run(10.0, 10.0, 0.0, 10.0),
            run(0.0, 10.0, 0.0, 0.0),
            run(0.0, 0.0, 4.0, 0.0),
        ];
        let cleaned = clean(runs, true).expect("square survives");
        assert_eq!(cleaned.len(), 4);

        let merged = cleaned
            .iter()
            .find(|r| r.piece_count() == 2)
            .expect("one merged run");
        assert!((merged.segment.length() - 10.0).abs() < 1e-9);
        assert!((merged.segment.source.x - 0.0).abs() < 1e-9);
        assert!((merged.segment.target.x - 10.0).abs() < 1e-9);
        // Piece shares 4/10 and 6/10 with no residual error.
        assert!((merged.boundaries[1] - 0.4).abs() < 1e-9);
        assert!((merged.boundaries[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn open_contour_walk_does_not_wrap() {
        // First and last segments are parallel but sit at the ends of an
        // open polyline, so they stay separate.
        let runs = vec![
            run(0.0, 0.0, 10.0, 0.0),
            run(10.0, 0.0, 10.0, 10.0),
            run(10.0, 10.0, 0.0, 10.0),
            run(0.0, 10.0, 0.0, 5.0),
            run(0.0, 5.0, 10.0, 5.0),
        ];
        let cleaned = clean(runs, false).expect("open contour survives");
        assert_eq!(cleaned.len(), 5);
        assert!(cleaned.iter().all(|r| r.piece_count() == 1));
    }

    #[test]
    fn merged_boundaries_absorb_a_gap() {
        // Two bottom pieces with a one-unit gap: raw shares cover 9 of the
        // 10-unit merged span, the error spread closes the last boundary
        // at exactly one.
        let runs = vec![
            run(0.0, 0.0, 4.0, 0.0),
            run(5.0, 0.0, 10.0, 0.0),
            run(10.0, 0.0, 10.0, 10.0),
            run(10.0, 10.0, 0.0, 10.0),
            run(0.0, 10.0, 0.0, 0.0),
        ];
        let cleaned = clean(runs, true).expect("square survives");
        let merged = cleaned
            .iter()
            .find(|r| r.piece_count() == 2)
            .expect("bottom pieces merged");
        let last = merged.boundaries[merged.boundaries.len() - 1];
        assert!((last - 1.0).abs() < 1e-12);
        // 4/10 plus half the missing 1/10.
        assert!((merged.boundaries[1] - 0.45).abs() < 1e-9);
    }
}
