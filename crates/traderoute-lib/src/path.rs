use crate::error::{Error, Result};
use crate::graph::{RegionId, RouteGraph};

/// Ordered region identifiers from the source of the last run to `target`.
///
/// Walks `previous` links back to the source and reverses them. A target with
/// no predecessor yields `[target]`, which is also the result for an
/// unreachable target; check [`Region::is_reachable`](crate::graph::Region::is_reachable)
/// before trusting the path.
pub fn reconstruct(graph: &RouteGraph, target: RegionId) -> Result<Vec<RegionId>> {
    let mut region = graph
        .region(target)
        .ok_or(Error::TargetNotInGraph { id: target })?;

    let mut path = vec![target];
    while let Some(previous) = region.previous() {
        // Predecessor chains are trees, so they cannot exceed the region count.
        if path.len() > graph.len() {
            break;
        }
        path.push(previous);
        region = graph
            .region(previous)
            .ok_or(Error::TargetNotInGraph { id: previous })?;
    }
    path.reverse();
    Ok(path)
}

/// Total travel time of `path`, recomputed from edge weights.
///
/// This does not read the stored distances, so after a correct run it must
/// agree with the target's distance. An empty or single-region path costs
/// nothing.
pub fn path_cost(graph: &RouteGraph, path: &[RegionId]) -> Result<f64> {
    path.windows(2).try_fold(0.0, |total, pair| {
        let (from, to) = (pair[0], pair[1]);
        graph
            .weight(from, to)
            .map(|weight| total + weight)
            .ok_or(Error::BrokenPath { from, to })
    })
}
