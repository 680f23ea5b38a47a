use super::Run;
use crate::segment::Segment;

/// Expands every merged run back into its constituent pieces, placed along
/// the run's final direction at the recorded split fractions.
pub(crate) fn split_runs(runs: &[Run]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(runs.iter().map(Run::piece_count).sum());
    for run in runs {
        if run.piece_count() == 1 {
            segments.push(run.segment);
            continue;
        }
        let source = run.segment.source;
        let direction = run.segment.to_vector();
        for pair in run.boundaries.windows(2) {
            segments.push(Segment::new(
                source + direction * pair[0],
                source + direction * pair[1],
            ));
        }
    }
    segments
}
