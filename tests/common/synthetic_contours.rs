use contour_regularizer::{Contour, Segment};

/// Axis-aligned rectangle with corners (0, 0) and (width, height), listed
/// counter-clockwise from the bottom edge.
pub fn rectangle(width: f64, height: f64) -> Contour {
    Contour::closed(vec![
        Segment::from_coords(0.0, 0.0, width, 0.0),
        Segment::from_coords(width, 0.0, width, height),
        Segment::from_coords(width, height, 0.0, height),
        Segment::from_coords(0.0, height, 0.0, 0.0),
    ])
}

/// Rotates one segment of `contour` about its own midpoint, leaving the
/// endpoints of its neighbors alone. The contour is no longer watertight
/// afterwards, which is exactly the kind of noise regularization consumes.
pub fn perturb_segment(contour: &mut Contour, index: usize, angle_deg: f64) {
    let segment = &mut contour.segments[index];
    let pivot = segment.barycenter();
    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    let rotate = |p: nalgebra::Point2<f64>| {
        let d = p - pivot;
        nalgebra::Point2::new(
            pivot.x + cos * d.x - sin * d.y,
            pivot.y + sin * d.x + cos * d.y,
        )
    };
    segment.source = rotate(segment.source);
    segment.target = rotate(segment.target);
}

pub fn max_corner_distance(contour: &Contour, corners: &[(f64, f64)]) -> f64 {
    contour
        .segments
        .iter()
        .zip(corners)
        .map(|(segment, &(x, y))| {
            let dx = segment.source.x - x;
            let dy = segment.source.y - y;
            (dx * dx + dy * dy).sqrt()
        })
        .fold(0.0, f64::max)
}
