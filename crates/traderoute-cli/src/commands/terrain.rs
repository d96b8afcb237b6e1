//! Terrain command handler: prints the terrain speed table.

use std::io;

use anyhow::{Context, Result};

use traderoute_lib::TerrainSpeedTable;

use super::CommandContext;
use crate::output::{render_terrain, TerrainListing};

pub fn handle_terrain_command(ctx: &CommandContext) -> Result<()> {
    let network = ctx.load_network()?;
    let table = TerrainSpeedTable::from_records(&network.terrain)
        .context("failed to read the terrain speed table")?;

    let listings: Vec<_> = table
        .entries()
        .into_iter()
        .map(|(terrain, travel_speed)| TerrainListing {
            terrain: terrain.to_string(),
            travel_speed,
        })
        .collect();
    render_terrain(&mut io::stdout().lock(), &listings, ctx.format)
        .context("failed to write terrain listing")
}
