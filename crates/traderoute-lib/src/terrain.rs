use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::records::TerrainRecord;

/// Lookup table from terrain label to travel speed multiplier.
///
/// Built once from the provider's terrain records before any graph is
/// constructed. Labels are matched exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainSpeedTable {
    speeds: HashMap<String, f64>,
}

impl TerrainSpeedTable {
    /// Build the table from terrain records, rejecting non-positive speeds.
    ///
    /// A label listed twice keeps the last speed, matching how the records
    /// would overwrite each other in a plain map.
    pub fn from_records<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a TerrainRecord>,
    {
        let mut table = Self::default();
        for record in records {
            table.insert(record.terrain.clone(), record.travel_speed)?;
        }
        Ok(table)
    }

    /// Register or replace the speed multiplier for `terrain`.
    pub fn insert(&mut self, terrain: impl Into<String>, speed: f64) -> Result<()> {
        let terrain = terrain.into();
        if !(speed.is_finite() && speed > 0.0) {
            return Err(Error::InvalidTerrainSpeed { terrain, speed });
        }
        self.speeds.insert(terrain, speed);
        Ok(())
    }

    /// Speed multiplier for `terrain`, if known.
    pub fn speed(&self, terrain: &str) -> Option<f64> {
        self.speeds.get(terrain).copied()
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    /// Terrain entries sorted by label.
    pub fn entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self
            .speeds
            .iter()
            .map(|(terrain, speed)| (terrain.as_str(), *speed))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
