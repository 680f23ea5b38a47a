mod common;

use common::synthetic_contours::{max_corner_distance, perturb_segment, rectangle};
use contour_regularizer::{
    Contour, ContourStatus, RegularizeParams, Rejection, Segment, ShapeRegularizer,
};

#[test]
fn axis_aligned_rectangle_is_a_fixed_point() {
    let regularizer = ShapeRegularizer::new(RegularizeParams::default()).unwrap();
    let input = vec![rectangle(10.0, 6.0)];
    let output = regularizer.regularize(&input).unwrap();

    assert_eq!(output.report.outcomes[0].status, ContourStatus::Regularized);
    let result = &output.contours[0].contour;
    assert_eq!(result.len(), 4);
    for (a, b) in result.segments.iter().zip(&input[0].segments) {
        assert!((a.source - b.source).norm() < 1e-9);
        assert!((a.target - b.target).norm() < 1e-9);
    }
}

#[test]
fn zero_angle_bound_returns_input_verbatim() {
    let mut params = RegularizeParams::default();
    params.angle_bound = 0.0;
    let regularizer = ShapeRegularizer::new(params).unwrap();

    let mut contour = rectangle(10.0, 10.0);
    perturb_segment(&mut contour, 2, 2.0);
    let input = vec![contour];
    let output = regularizer.regularize(&input).unwrap();

    assert_eq!(output.report.outcomes[0].status, ContourStatus::Passthrough);
    for (a, b) in output.contours[0]
        .contour
        .segments
        .iter()
        .zip(&input[0].segments)
    {
        assert_eq!(a.source, b.source);
        assert_eq!(a.target, b.target);
    }
}

#[test]
fn perturbed_rectangle_snaps_back_to_the_axes() {
    // Rectangle with the top edge in two pieces. The pieces tilt by +2 and
    // -2 degrees about their midpoints; the deviations cancel, so the
    // optimal corrections restore the rectangle exactly.
    let mut contour = Contour::closed(vec![
        Segment::from_coords(0.0, 0.0, 10.0, 0.0),
        Segment::from_coords(10.0, 0.0, 10.0, 8.0),
        Segment::from_coords(10.0, 8.0, 5.0, 8.0),
        Segment::from_coords(5.0, 8.0, 0.0, 8.0),
        Segment::from_coords(0.0, 8.0, 0.0, 0.0),
    ]);
    perturb_segment(&mut contour, 2, 2.0);
    perturb_segment(&mut contour, 3, -2.0);

    let regularizer = ShapeRegularizer::new(RegularizeParams::default()).unwrap();
    let output = regularizer.regularize(&[contour]).unwrap();

    assert_eq!(output.report.outcomes[0].status, ContourStatus::Regularized);
    let result = &output.contours[0].contour;
    assert_eq!(result.len(), 5);
    let corners = [
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 8.0),
        (5.0, 8.0),
        (0.0, 8.0),
    ];
    let worst = max_corner_distance(result, &corners);
    assert!(worst < 1e-6, "corner displacement {worst:.2e}");
}

#[test]
fn perturbed_square_snaps_back_to_the_axes() {
    // Square with the top and left edges tilted by +2 and -2 degrees about
    // their midpoints. The bottom and right edges stay exact and anchor
    // their direction groups.
    let mut contour = rectangle(10.0, 10.0);
    perturb_segment(&mut contour, 2, 2.0);
    perturb_segment(&mut contour, 3, -2.0);

    let mut params = RegularizeParams::default();
    params.angle_bound = 10.0;
    params.min_length = 1.0;
    params.ordinate_bound = 0.5;
    let regularizer = ShapeRegularizer::new(params).unwrap();
    let output = regularizer.regularize(&[contour]).unwrap();

    assert_eq!(output.report.outcomes[0].status, ContourStatus::Regularized);
    let result = &output.contours[0].contour;
    assert_eq!(result.len(), 4);
    let corners = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
    let worst = max_corner_distance(result, &corners);
    assert!(worst < 1e-6, "corner displacement {worst:.2e}");
}

#[test]
fn jogged_bottom_edge_merges_and_splits_back() {
    // A square whose bottom edge arrives in two pieces with a 0.02 jog
    // between them. The pieces merge into one run during cleaning, snap
    // onto a common line, and split back afterwards.
    let contour = Contour::closed(vec![
        Segment::from_coords(0.0, 0.0, 4.0, 0.0),
        Segment::from_coords(4.0, 0.02, 10.0, 0.02),
        Segment::from_coords(10.0, 0.02, 10.0, 10.0),
        Segment::from_coords(10.0, 10.0, 0.0, 10.0),
        Segment::from_coords(0.0, 10.0, 0.0, 0.0),
    ]);

    let regularizer = ShapeRegularizer::new(RegularizeParams::default()).unwrap();
    let output = regularizer.regularize(&[contour]).unwrap();

    assert_eq!(output.report.outcomes[0].status, ContourStatus::Regularized);
    let result = &output.contours[0].contour;
    assert_eq!(result.len(), 5);

    // The two bottom pieces are collinear and together span the full width.
    let first = &result.segments[0];
    let second = &result.segments[1];
    assert!((first.source.y - second.source.y).abs() < 1e-9);
    assert!((first.target - second.source).norm() < 1e-9);
    assert!((first.length() + second.length() - 10.0).abs() < 1e-6);
    assert!(first.source.y > -1e-9 && first.source.y < 0.02 + 1e-9);
}

#[test]
fn unreconstructable_contour_falls_back_to_rotated_segments() {
    let triangle = Contour::closed(vec![
        Segment::from_coords(20.0, 0.0, 30.0, 0.0),
        Segment::from_coords(30.0, 0.0, 25.0, 8.0),
        Segment::from_coords(25.0, 8.0, 20.0, 0.0),
    ]);
    let input = vec![rectangle(10.0, 10.0), triangle];

    let regularizer = ShapeRegularizer::new(RegularizeParams::default()).unwrap();
    let output = regularizer.regularize(&input).unwrap();

    assert_eq!(output.report.outcomes[0].status, ContourStatus::Regularized);
    assert_eq!(
        output.report.outcomes[1].status,
        ContourStatus::Rejected {
            reason: Rejection::TooFewSegments { survivors: 3 }
        }
    );
    // The triangle's directions are already regular (its slanted sides seed
    // their own direction groups), so the rotated fallback coincides with
    // the input up to solver noise.
    for (a, b) in output.contours[1]
        .contour
        .segments
        .iter()
        .zip(&input[1].segments)
    {
        assert!((a.source - b.source).norm() < 1e-9);
        assert!((a.target - b.target).norm() < 1e-9);
    }
}

#[test]
fn report_counts_and_timings_are_populated() {
    let regularizer = ShapeRegularizer::new(RegularizeParams::default()).unwrap();
    let output = regularizer.regularize(&[rectangle(10.0, 10.0)]).unwrap();

    let report = &output.report;
    assert_eq!(report.segment_count, 4);
    assert!(report.edge_count > 0);
    assert!(report.group_count >= 2);
    assert!(report.timings.total_ms >= 0.0);

    // The report serializes for downstream logging.
    let json = serde_json::to_string(report).unwrap();
    assert!(json.contains("\"segment_count\":4"));
}
