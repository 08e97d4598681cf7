// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulation settings written into the IDF preamble.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::shading::MAX_SNAP_DISTANCE;

/// Site location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: f64,
    pub elevation: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            name: "Site".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            time_zone: 0.0,
            elevation: 0.0,
        }
    }
}

/// Simulated calendar range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunPeriod {
    pub name: String,
    pub begin_month: u8,
    pub begin_day: u8,
    pub end_month: u8,
    pub end_day: u8,
}

impl Default for RunPeriod {
    fn default() -> Self {
        Self {
            name: "Annual".to_string(),
            begin_month: 1,
            begin_day: 1,
            end_month: 12,
            end_day: 31,
        }
    }
}

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// EnergyPlus version written to the `Version` object
    pub energyplus_version: String,
    pub building_name: String,
    /// Degrees
    pub north_axis: f64,
    pub terrain: String,
    pub loads_convergence_tolerance: f64,
    pub temperature_convergence_tolerance: f64,
    pub solar_distribution: String,
    pub timesteps_per_hour: u32,
    pub location: Location,
    pub run_period: RunPeriod,
    /// Metres; shading further than this from a wall is not anchored
    pub max_snap_distance: f64,
    /// Metres fenestration vertices are pulled towards their centroid
    pub fenestration_inset: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            energyplus_version: "23.2".to_string(),
            building_name: "Building".to_string(),
            north_axis: 0.0,
            terrain: "Suburbs".to_string(),
            loads_convergence_tolerance: 0.04,
            temperature_convergence_tolerance: 0.4,
            solar_distribution: "FullExterior".to_string(),
            timesteps_per_hour: 4,
            location: Location::default(),
            run_period: RunPeriod::default(),
            max_snap_distance: MAX_SNAP_DISTANCE,
            fenestration_inset: 0.01,
        }
    }
}

impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
