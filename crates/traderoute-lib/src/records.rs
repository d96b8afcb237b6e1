use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::graph::RegionId;

/// One row of the terrain speed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainRecord {
    pub terrain: String,
    pub travel_speed: f64,
}

/// One region node. Only `region_num` matters for routing; the name is used
/// for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub region_num: RegionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One undirected trade route between two regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRouteRecord {
    pub origin: RegionId,
    pub destination: RegionId,
    pub distance: f64,
    /// `land` or `sea`; parsed when the edge is inserted.
    pub route_type: String,
    pub terrain_type: String,
}

/// The three record streams supplied by the data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeNetwork {
    #[serde(default)]
    pub terrain: Vec<TerrainRecord>,
    #[serde(default)]
    pub regions: Vec<RegionRecord>,
    #[serde(default)]
    pub trade_routes: Vec<TradeRouteRecord>,
}

impl TradeNetwork {
    /// Decode a network from a JSON document with `terrain`, `regions` and
    /// `trade_routes` arrays.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode a JSON network file.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let network = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            terrain = network.terrain.len(),
            regions = network.regions.len(),
            trade_routes = network.trade_routes.len(),
            "loaded trade network from json"
        );
        Ok(network)
    }

    /// Map of region identifiers to their display names, where known.
    pub fn region_names(&self) -> HashMap<RegionId, String> {
        self.regions
            .iter()
            .filter_map(|region| region.name.clone().map(|name| (region.region_num, name)))
            .collect()
    }
}
