//! Route command handler for computing the fastest path between two regions.

use std::io;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use traderoute_lib::{
    build_graph, plan_route_in_graph, RegionId, RouteAlgorithm, RouteRequest, RouteSummary,
    TravelConfig,
};

use super::CommandContext;
use crate::output::render_route;

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting region number.
    #[arg(long = "from")]
    pub from: RegionId,
    /// Destination region number.
    #[arg(long = "to")]
    pub to: RegionId,
    /// Shortest-path engine to use (`dijkstra` or `rescan`).
    #[arg(long, default_value_t = RouteAlgorithm::Dijkstra)]
    pub algorithm: RouteAlgorithm,
    /// Caravan speed for land routes; overrides the configuration file.
    #[arg(long)]
    pub caravan_speed: Option<f64>,
    /// Sailing speed for sea routes; overrides the configuration file.
    #[arg(long)]
    pub sailing_speed: Option<f64>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from, self.to).with_algorithm(self.algorithm)
    }

    /// Apply speed overrides on top of `base`.
    pub fn travel_config(&self, base: TravelConfig) -> TravelConfig {
        TravelConfig {
            caravan_speed: self.caravan_speed.unwrap_or(base.caravan_speed),
            sailing_speed: self.sailing_speed.unwrap_or(base.sailing_speed),
        }
    }
}

/// Result of the route command, mapped to the process exit status by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Found,
    Unreachable,
}

/// Handle the route subcommand.
///
/// Loads the dataset, builds the graph with the effective travel
/// configuration, and prints the route in the selected format. An
/// unreachable goal is reported through [`RouteStatus::Unreachable`] rather
/// than an error.
pub fn handle_route_command(ctx: &CommandContext, args: &RouteCommandArgs) -> Result<RouteStatus> {
    let network = ctx.load_network()?;
    let config = args.travel_config(ctx.travel_config()?);
    let mut graph = build_graph(&network, &config).context("failed to build the route graph")?;

    let request = args.to_request();
    let outcome = plan_route_in_graph(&mut graph, &request).with_context(|| {
        format!(
            "failed to plan a route from {} to {}",
            request.start, request.goal
        )
    })?;

    let summary = RouteSummary::from_outcome(&outcome, &graph, &network.region_names())
        .context("failed to summarise the route")?;
    render_route(&mut io::stdout().lock(), &summary, ctx.format)
        .context("failed to write route output")?;

    if outcome.is_reachable() {
        info!(
            start = request.start,
            goal = request.goal,
            hops = summary.hops,
            "route found"
        );
        Ok(RouteStatus::Found)
    } else {
        Ok(RouteStatus::Unreachable)
    }
}
