//! Regions command handler: lists every region with its trade route count.

use std::io;

use anyhow::{Context, Result};

use traderoute_lib::{build_graph, RegionId, RouteGraph};

use super::CommandContext;
use crate::output::{render_regions, RegionListing};

pub fn handle_regions_command(ctx: &CommandContext) -> Result<()> {
    let network = ctx.load_network()?;
    let graph = build_graph(&network, &ctx.travel_config()?)
        .context("failed to build the route graph")?;
    let names = network.region_names();

    let listings = region_listings(&graph, |id| names.get(&id).cloned());
    render_regions(&mut io::stdout().lock(), &listings, ctx.format)
        .context("failed to write region listing")
}

/// Regions in graph insertion order.
pub fn region_listings<F>(graph: &RouteGraph, name_of: F) -> Vec<RegionListing>
where
    F: Fn(RegionId) -> Option<String>,
{
    graph
        .regions()
        .map(|region| RegionListing {
            id: region.id(),
            name: name_of(region.id()),
            neighbours: region.neighbours().len(),
        })
        .collect()
}
