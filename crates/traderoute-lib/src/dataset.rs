use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::db::load_trade_network;
use crate::error::{Error, Result};
use crate::records::TradeNetwork;

/// Default filename for the dataset inside the platform data directory.
const DATASET_FILENAME: &str = "trade_routes.db";

/// Environment variable overriding the dataset location.
pub const DATA_ENV_VAR: &str = "TRADEROUTE_DATA";

/// Encoding of a dataset file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Sqlite,
    Json,
}

impl DatasetFormat {
    /// `.json` files are JSON documents; everything else is opened as SQLite.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::Json,
            _ => DatasetFormat::Sqlite,
        }
    }
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "traderoute", "traderoute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Locate the dataset to load.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `TRADEROUTE_DATA` environment variable.
/// 3. Platform-specific project data directory.
///
/// A directory resolves to `trade_routes.db` inside it. The resolved file
/// must exist.
pub fn resolve_dataset(target: Option<&Path>) -> Result<PathBuf> {
    let candidate = match target {
        Some(explicit) => canonical_dataset_path(explicit),
        None => match env::var_os(DATA_ENV_VAR) {
            Some(env_path) => canonical_dataset_path(Path::new(&env_path)),
            None => default_dataset_path()?,
        },
    };

    if !candidate.is_file() {
        return Err(Error::DatasetNotFound { path: candidate });
    }
    debug!(path = %candidate.display(), "resolved dataset");
    Ok(candidate)
}

/// Load a dataset file in whichever encoding its extension indicates.
pub fn load_dataset(path: &Path) -> Result<TradeNetwork> {
    match DatasetFormat::for_path(path) {
        DatasetFormat::Sqlite => load_trade_network(path),
        DatasetFormat::Json => TradeNetwork::from_json_path(path),
    }
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join(DATASET_FILENAME);
    }
    path.to_path_buf()
}
