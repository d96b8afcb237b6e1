//! Single-source shortest paths over a [`RouteGraph`].
//!
//! Engines write their results into the graph itself: after a run every
//! region carries its travel time from the source (`distance`), whether it was
//! finalized (`visited`) and its predecessor on the shortest-path tree
//! (`previous`). Each run starts by resetting those fields, so a graph can be
//! re-run from a different source.
//!
//! Two engines implement [`ShortestPathEngine`]:
//! - [`DijkstraEngine`] uses a binary heap with lazy deletion and runs in
//!   O((V + E) log V). This is the engine used by [`run`].
//! - [`RescanEngine`] scans every unvisited region for the minimum on each
//!   iteration, O(V²). It does not scale past a few hundred regions and is
//!   kept as a reference for cross-checking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{RegionId, RouteGraph};

/// Strategy interface for shortest-path engines.
pub trait ShortestPathEngine {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Compute shortest travel times from `source` to every region of
    /// `graph`, recording them on the regions.
    fn run(&self, graph: &mut RouteGraph, source: RegionId) -> Result<()>;
}

/// Run the default engine from `source`.
pub fn run(graph: &mut RouteGraph, source: RegionId) -> Result<()> {
    DijkstraEngine.run(graph, source)
}

/// Heap-based Dijkstra with lazy deletion.
///
/// Improved distances push a fresh queue entry; entries for regions that are
/// already visited are discarded when popped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraEngine;

impl ShortestPathEngine for DijkstraEngine {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn run(&self, graph: &mut RouteGraph, source: RegionId) -> Result<()> {
        let source_index = prepare(graph, source)?;

        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry::new(source_index, 0.0));

        let mut visited = 0usize;
        let mut stale = 0usize;
        while let Some(entry) = queue.pop() {
            if graph.region_at(entry.index).visited {
                stale += 1;
                continue;
            }
            visited += 1;
            relax_neighbours(graph, entry.index, |index, cost| {
                queue.push(QueueEntry::new(index, cost));
            });
        }

        debug!(
            engine = self.name(),
            source,
            visited,
            stale,
            regions = graph.len(),
            "shortest path run complete"
        );
        Ok(())
    }
}

/// Quadratic Dijkstra that re-derives the minimum by scanning all regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RescanEngine;

impl ShortestPathEngine for RescanEngine {
    fn name(&self) -> &'static str {
        "rescan"
    }

    fn run(&self, graph: &mut RouteGraph, source: RegionId) -> Result<()> {
        prepare(graph, source)?;

        let mut visited = 0usize;
        while let Some(current) = closest_unvisited(graph) {
            visited += 1;
            relax_neighbours(graph, current, |_, _| {});
        }

        debug!(
            engine = self.name(),
            source,
            visited,
            regions = graph.len(),
            "shortest path run complete"
        );
        Ok(())
    }
}

/// Reset traversal state and seed the source. Returns the source's index.
fn prepare(graph: &mut RouteGraph, source: RegionId) -> Result<usize> {
    let source_index = graph
        .index_of(source)
        .ok_or(Error::SourceNotInGraph { id: source })?;
    graph.reset_traversal();
    graph.region_at_mut(source_index).distance = 0.0;
    Ok(source_index)
}

/// Mark `current` visited and relax its unvisited neighbours.
///
/// Relaxation is strict: an equal candidate keeps the predecessor found
/// first. `on_improved` receives every region whose distance dropped.
fn relax_neighbours<F>(graph: &mut RouteGraph, current: usize, mut on_improved: F)
where
    F: FnMut(usize, f64),
{
    let (current_id, current_distance, degree) = {
        let region = graph.region_at_mut(current);
        region.visited = true;
        (region.id(), region.distance, region.neighbours().len())
    };

    for slot in 0..degree {
        let neighbour = graph.region_at(current).neighbours()[slot];
        let next = graph.region_at_mut(neighbour.index);
        if next.visited {
            continue;
        }

        let candidate = current_distance + neighbour.weight;
        if candidate < next.distance {
            next.distance = candidate;
            next.previous = Some(current_id);
            on_improved(neighbour.index, candidate);
        }
    }
}

/// Unvisited region with the smallest finite distance; ties go to the region
/// inserted first.
fn closest_unvisited(graph: &RouteGraph) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, region) in graph.regions().enumerate() {
        if region.visited || !region.is_reachable() {
            continue;
        }
        match best {
            Some((_, distance)) if distance <= region.distance => {}
            _ => best = Some((index, region.distance)),
        }
    }
    best.map(|(index, _)| index)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    index: usize,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(index: usize, cost: f64) -> Self {
        Self {
            index,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
