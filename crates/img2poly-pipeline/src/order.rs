//! Loop ordering: chain unordered boundary points into a closed traversal.
//!
//! Uses greedy nearest-neighbor chaining. Starting from the first point,
//! the nearest unplaced point is appended repeatedly until every point
//! is placed. The heuristic has no lookahead, so one pass can skip a
//! point and come back for it later, which shows up as a crossing edge
//! in the traced outline. Running the same pass again over the chained
//! output smooths most of these out in practice, which is why
//! [`PipelineConfig::ordering_passes`](crate::PipelineConfig::ordering_passes)
//! defaults to 2.
//!
//! Each pass is O(n²) in the number of boundary points. That count is
//! bounded by the perimeter of the shape, not its area.

use crate::types::Point;

/// One greedy nearest-neighbor pass.
///
/// The output is always a permutation of `points`:
///
/// - an empty input gives an empty output;
/// - the first input point is always the first output point;
/// - at each step, the remaining point closest (Euclidean) to the last
///   placed point is appended. On a tie the candidate that comes first
///   in the remaining list wins. Removal keeps the relative order of the
///   remaining points, so that is also their original relative order.
#[must_use = "returns the reordered points"]
pub fn order_loop(points: Vec<Point>) -> Vec<Point> {
    let mut remaining = points;
    if remaining.is_empty() {
        return remaining;
    }

    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(0));

    while remaining.len() > 1 {
        let Some(&current) = ordered.last() else {
            break;
        };
        let next = nearest_index(current, &remaining);
        ordered.push(remaining.remove(next));
    }

    // The last point has nowhere else to go.
    ordered.extend(remaining.pop());
    ordered
}

/// Apply [`order_loop`] `passes` times in sequence.
///
/// Zero passes returns the input unchanged.
#[must_use = "returns the reordered points"]
pub fn order_loop_passes(points: Vec<Point>, passes: usize) -> Vec<Point> {
    (0..passes).fold(points, |acc, _| order_loop(acc))
}

/// Index of the first candidate at minimum distance from `from`.
///
/// `candidates` must be non-empty; an empty slice returns 0.
fn nearest_index(from: Point, candidates: &[Point]) -> usize {
    let mut best = 0;
    let mut best_dist = u64::MAX;
    for (i, &candidate) in candidates.iter().enumerate() {
        let dist = from.distance_squared(candidate);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
