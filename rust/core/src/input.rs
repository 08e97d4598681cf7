// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine output contract.
//!
//! The detection engine hands over one document per invocation holding
//! parallel collections of elements, spaces and boundaries. Ingestion scales
//! geometry to metres, rounds coordinates and thicknesses to fixed precision
//! and normalises empty foreign keys to `None`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use zonekit_geometry::{round_to, rounded_vector, THICKNESS_DIGITS};

use crate::error::{Error, Result};
use crate::model::{ElementInfo, ShadingSource, SpaceBoundary, SpaceInfo};

fn default_unit_scale() -> f64 {
    1.0
}

/// Raw document produced by the detection engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineDocument {
    /// Factor converting model length units to metres
    #[serde(default = "default_unit_scale")]
    pub length_unit_scale: f64,
    #[serde(default)]
    pub elements: Vec<ElementInfo>,
    #[serde(default)]
    pub spaces: Vec<SpaceInfo>,
    #[serde(default)]
    pub boundaries: Vec<SpaceBoundary>,
    #[serde(default)]
    pub shading: Vec<ShadingSource>,
}

/// Normalised records, ready for graph resolution
#[derive(Debug, Default)]
pub struct IngestedModel {
    pub elements: Vec<ElementInfo>,
    pub spaces: Vec<SpaceInfo>,
    pub boundaries: Vec<SpaceBoundary>,
    pub shading: Vec<ShadingSource>,
}

impl EngineDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Move the engine buffers into normalised owned collections.
    ///
    /// The document is consumed; nothing of the raw input outlives this call.
    /// Fails on a non-positive unit scale or a shading solid that cannot be
    /// decomposed.
    pub fn ingest(self) -> Result<IngestedModel> {
        let EngineDocument {
            length_unit_scale,
            elements,
            spaces,
            boundaries,
            shading,
        } = self;
        let scale = length_unit_scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::InvalidInput(format!(
                "length_unit_scale must be positive, got {scale}"
            )));
        }
        for source in &shading {
            source.geometry.validate()?;
        }

        let elements = elements
            .into_iter()
            .map(|mut e| {
                e.material_ref = non_empty(e.material_ref);
                e.geometry = e.geometry.map(|g| g.scale(scale).rounded());
                e
            })
            .collect();

        let spaces = spaces
            .into_iter()
            .map(|mut s| {
                s.geometry = s.geometry.map(|g| g.scale(scale).rounded());
                s
            })
            .collect();

        let boundaries = boundaries
            .into_iter()
            .map(|mut b| {
                b.geometry = b.geometry.scaled(scale).rounded();
                b.normal = rounded_vector(&b.normal);
                for layer in &mut b.layers {
                    layer.thickness = round_to(layer.thickness * scale, THICKNESS_DIGITS);
                }
                b.space_id = non_empty(b.space_id);
                b.opposite_id = non_empty(b.opposite_id);
                b.containing_id = non_empty(b.containing_id);
                b.element_id = if b.is_virtual {
                    None
                } else {
                    non_empty(b.element_id)
                };
                b
            })
            .collect();

        let shading = shading
            .into_iter()
            .map(|mut s| {
                s.geometry = s.geometry.scale(scale).rounded();
                s
            })
            .collect();

        Ok(IngestedModel {
            elements,
            spaces,
            boundaries,
            shading,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
