use std::path::PathBuf;

use thiserror::Error;

use crate::graph::RegionId;

/// Convenient result alias for the trade route library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the trade route dataset")]
    ProjectDirsUnavailable,

    /// Raised when the dataset does not expose the expected tables.
    #[error("unsupported dataset schema; expected terrain, regions and trade_routes tables")]
    UnsupportedSchema,

    /// A trade route references a terrain label missing from the speed table.
    #[error("unknown terrain '{terrain}' on trade route {origin} -> {destination}")]
    UnknownTerrain {
        terrain: String,
        origin: RegionId,
        destination: RegionId,
    },

    /// Terrain speed multipliers must be positive and finite.
    #[error("invalid travel speed {speed} for terrain '{terrain}'")]
    InvalidTerrainSpeed { terrain: String, speed: f64 },

    /// Trade route distances must be non-negative and finite.
    #[error("invalid distance {distance} on trade route {origin} -> {destination}")]
    InvalidDistance {
        origin: RegionId,
        destination: RegionId,
        distance: f64,
    },

    /// Raised when a route type is neither `land` nor `sea`.
    #[error("unknown route type '{value}'; expected 'land' or 'sea'")]
    UnknownRouteType { value: String },

    /// Raised when the caravan/sailing base speeds are unusable.
    #[error("invalid travel configuration: {message}")]
    InvalidTravelConfig { message: String },

    /// The requested source region was never added to the graph.
    #[error("source region {id} is not part of the trade network")]
    SourceNotInGraph { id: RegionId },

    /// The requested target region was never added to the graph.
    #[error("target region {id} is not part of the trade network")]
    TargetNotInGraph { id: RegionId },

    /// Raised when costing a path whose consecutive regions are not adjacent.
    #[error("regions {from} and {to} are not connected by a trade route")]
    BrokenPath { from: RegionId, to: RegionId },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
