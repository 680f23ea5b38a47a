use super::{is_parallel, rotate_adjusted, segment_angle};
use crate::segment::Segment;

/// Corrects segments at or below `min_length` from their neighbors: when the
/// two neighbors are themselves near-parallel, the short segment between
/// them is snapped orthogonal to the predecessor.
pub(crate) fn correct_short_segments(segments: &mut [Segment], closed: bool, min_length: f64) {
    let n = segments.len();
    if n < 3 {
        return;
    }
    for i in 0..n {
        if !closed && (i == 0 || i + 1 == n) {
            continue;
        }
        if segments[i].length() > min_length {
            continue;
        }
        let sm = segments[(i + n - 1) % n];
        let sp = segments[(i + 1) % n];
        correct_segment(&sm, &mut segments[i], &sp);
    }
}

fn correct_segment(sm: &Segment, si: &mut Segment, sp: &Segment) {
    if !is_parallel(sm, sp) {
        return;
    }
    let angle = segment_angle(sm, si);
    rotate_adjusted(si, angle, 90.0);
}
