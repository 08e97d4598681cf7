// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material library mapping engine material references to thermal data.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Surface roughness classes understood by EnergyPlus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Roughness {
    VeryRough,
    Rough,
    #[default]
    MediumRough,
    MediumSmooth,
    Smooth,
    VerySmooth,
}

impl Roughness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Roughness::VeryRough => "VeryRough",
            Roughness::Rough => "Rough",
            Roughness::MediumRough => "MediumRough",
            Roughness::MediumSmooth => "MediumSmooth",
            Roughness::Smooth => "Smooth",
            Roughness::VerySmooth => "VerySmooth",
        }
    }
}

fn default_thermal_absorptance() -> f64 {
    0.9
}

fn default_solar_absorptance() -> f64 {
    0.7
}

/// Thermal properties of a library material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialProperties {
    /// Opaque layer, thickness comes from the boundary layer
    Opaque {
        #[serde(default)]
        roughness: Roughness,
        /// W/(m*K)
        conductivity: f64,
        /// kg/m^3
        density: f64,
        /// J/(kg*K)
        specific_heat: f64,
        #[serde(default = "default_thermal_absorptance")]
        thermal_absorptance: f64,
        #[serde(default = "default_solar_absorptance")]
        solar_absorptance: f64,
        #[serde(default = "default_solar_absorptance")]
        visible_absorptance: f64,
    },
    /// Simple glazing system, independent of thickness
    Glazing {
        /// W/(m^2*K)
        u_factor: f64,
        solar_heat_gain: f64,
        visible_transmittance: f64,
    },
}

impl MaterialProperties {
    /// Generic properties used for unmapped references
    pub fn placeholder() -> Self {
        MaterialProperties::Opaque {
            roughness: Roughness::MediumRough,
            conductivity: 1.0,
            density: 1000.0,
            specific_heat: 1000.0,
            thermal_absorptance: default_thermal_absorptance(),
            solar_absorptance: default_solar_absorptance(),
            visible_absorptance: default_solar_absorptance(),
        }
    }

    #[inline]
    pub fn is_glazing(&self) -> bool {
        matches!(self, MaterialProperties::Glazing { .. })
    }
}

/// A named library entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryMaterial {
    pub name: String,
    #[serde(flatten)]
    pub properties: MaterialProperties,
}

/// Lookup table from material reference id to library material
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialLibrary {
    entries: FxHashMap<String, LibraryMaterial>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, reference: impl Into<String>, material: LibraryMaterial) {
        self.entries.insert(reference.into(), material);
    }

    pub fn get(&self, reference: &str) -> Option<&LibraryMaterial> {
        self.entries.get(reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
