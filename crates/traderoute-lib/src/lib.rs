//! Trade route planner library entry points.
//!
//! This crate exposes helpers to locate the trade network dataset, load its
//! terrain, region and trade-route records, build the travel-time weighted
//! route graph, and run shortest-path searches over it. Higher-level
//! consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod dataset;
pub mod db;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod records;
pub mod routing;
pub mod terrain;

pub use config::{RouteType, TravelConfig};
pub use dataset::{default_dataset_path, load_dataset, resolve_dataset, DatasetFormat};
pub use db::load_trade_network;
pub use dijkstra::{run, DijkstraEngine, RescanEngine, ShortestPathEngine};
pub use error::{Error, Result};
pub use graph::{build_graph, Neighbour, Region, RegionId, RouteGraph};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{path_cost, reconstruct};
pub use records::{RegionRecord, TerrainRecord, TradeNetwork, TradeRouteRecord};
pub use routing::{
    plan_route, plan_route_in_graph, RouteAlgorithm, RouteOutcome, RoutePlan, RouteRequest,
};
pub use terrain::TerrainSpeedTable;
