use std::collections::HashMap;
use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{RegionId, RouteGraph};
use crate::routing::{RouteAlgorithm, RouteOutcome};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: RegionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn new(id: RegionId, names: &HashMap<RegionId, String>) -> Self {
        Self {
            id,
            name: names.get(&id).cloned(),
        }
    }

    fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.id),
            None => self.id.to_string(),
        }
    }
}

/// Region visited along a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: RegionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Travel time of the trade route that led here; zero for the start.
    pub leg_cost: f64,
    /// Travel time from the start up to this region.
    pub cumulative_cost: f64,
}

/// Structured representation of a route outcome that higher-level consumers
/// can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub reachable: bool,
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    /// Total travel time; `None` when the goal is unreachable.
    pub total_cost: Option<f64>,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert an outcome into a summary, resolving names and per-leg travel
    /// times against the graph the route was planned on.
    pub fn from_outcome(
        outcome: &RouteOutcome,
        graph: &RouteGraph,
        names: &HashMap<RegionId, String>,
    ) -> Result<Self> {
        match outcome {
            RouteOutcome::Unreachable {
                algorithm,
                start,
                goal,
            } => Ok(Self {
                reachable: false,
                algorithm: *algorithm,
                hops: 0,
                start: RouteEndpoint::new(*start, names),
                goal: RouteEndpoint::new(*goal, names),
                total_cost: None,
                steps: Vec::new(),
            }),
            RouteOutcome::Found(plan) => {
                let mut steps = Vec::with_capacity(plan.steps.len());
                let mut cumulative = 0.0;
                let mut previous: Option<RegionId> = None;
                for (index, &id) in plan.steps.iter().enumerate() {
                    let leg_cost = match previous {
                        Some(from) => graph
                            .weight(from, id)
                            .ok_or(Error::BrokenPath { from, to: id })?,
                        None => 0.0,
                    };
                    cumulative += leg_cost;
                    steps.push(RouteStep {
                        index,
                        id,
                        name: names.get(&id).cloned(),
                        leg_cost,
                        cumulative_cost: cumulative,
                    });
                    previous = Some(id);
                }

                Ok(Self {
                    reachable: true,
                    algorithm: plan.algorithm,
                    hops: plan.hop_count(),
                    start: RouteEndpoint::new(plan.start, names),
                    goal: RouteEndpoint::new(plan.goal, names),
                    total_cost: Some(plan.total_cost),
                    steps,
                })
            }
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let Some(total) = self.total_cost else {
            let _ = writeln!(
                buffer,
                "No route: {} is unreachable from {}",
                self.goal.display_name(),
                self.start.display_name()
            );
            return buffer;
        };

        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, algorithm: {})",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            let label = RouteEndpoint {
                id: step.id,
                name: step.name.clone(),
            }
            .display_name();
            let _ = writeln!(
                buffer,
                "{:>3}: {} [+{:.2}, {:.2}]",
                step.index, label, step.leg_cost, step.cumulative_cost
            );
        }
        let _ = writeln!(buffer, "Total travel time: {total:.2}");
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let Some(total) = self.total_cost else {
            let _ = writeln!(
                buffer,
                "**No route** from _{}_ to _{}_",
                self.start.display_name(),
                self.goal.display_name()
            );
            return buffer;
        };

        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} hops, algorithm: `{}`)",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            let name = step.name.as_deref().unwrap_or("-");
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** (`{}`) {:.2}",
                step.index, name, step.id, step.cumulative_cost
            );
        }
        let _ = writeln!(buffer, "Total travel time: **{total:.2}**");
        buffer
    }
}
