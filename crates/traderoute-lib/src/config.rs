use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base speed of a land caravan before terrain is applied.
pub const DEFAULT_CARAVAN_SPEED: f64 = 20.0;

/// Base speed of a sailing vessel before terrain is applied.
pub const DEFAULT_SAILING_SPEED: f64 = 100.0;

/// Transport mode of a trade route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Land,
    Sea,
}

impl RouteType {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteType::Land => "land",
            RouteType::Sea => "sea",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "land" => Ok(RouteType::Land),
            "sea" => Ok(RouteType::Sea),
            _ => Err(Error::UnknownRouteType {
                value: value.to_string(),
            }),
        }
    }
}

/// Transport-mode base speeds used when deriving edge weights.
///
/// Passed explicitly into graph construction so independent graphs can be
/// built with different settings side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    pub caravan_speed: f64,
    pub sailing_speed: f64,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            caravan_speed: DEFAULT_CARAVAN_SPEED,
            sailing_speed: DEFAULT_SAILING_SPEED,
        }
    }
}

impl TravelConfig {
    /// Read a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: TravelConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject speeds that would yield infinite, negative, or NaN weights.
    pub fn validate(&self) -> Result<()> {
        for (label, speed) in [
            ("caravan_speed", self.caravan_speed),
            ("sailing_speed", self.sailing_speed),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(Error::InvalidTravelConfig {
                    message: format!("{label} must be positive, got {speed}"),
                });
            }
        }
        Ok(())
    }

    /// Base speed for the given transport mode.
    pub fn base_speed(&self, route_type: RouteType) -> f64 {
        match route_type {
            RouteType::Land => self.caravan_speed,
            RouteType::Sea => self.sailing_speed,
        }
    }
}
