//! Subcommand handlers.
//!
//! Each module handles one subcommand; `main.rs` only parses arguments and
//! dispatches here.

pub mod regions;
pub mod route;
pub mod terrain;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use traderoute_lib::{load_dataset, resolve_dataset, TradeNetwork, TravelConfig};

use crate::output::OutputFormat;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Dataset file or directory given with `--data`.
    pub data: Option<PathBuf>,
    /// Travel configuration file given with `--config`.
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Resolve and load the trade network dataset.
    pub fn load_network(&self) -> Result<TradeNetwork> {
        let path = resolve_dataset(self.data.as_deref())
            .context("failed to locate the trade route dataset")?;
        let network = load_dataset(&path)
            .with_context(|| format!("failed to load dataset from {}", path.display()))?;
        debug!(
            path = %path.display(),
            regions = network.regions.len(),
            routes = network.trade_routes.len(),
            "dataset loaded"
        );
        Ok(network)
    }

    /// Travel configuration from `--config`, or the defaults.
    pub fn travel_config(&self) -> Result<TravelConfig> {
        match self.config.as_deref() {
            Some(path) => load_travel_config(path),
            None => Ok(TravelConfig::default()),
        }
    }
}

fn load_travel_config(path: &Path) -> Result<TravelConfig> {
    TravelConfig::from_json_path(path)
        .with_context(|| format!("failed to read travel configuration from {}", path.display()))
}
