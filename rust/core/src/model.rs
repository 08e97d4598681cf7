// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building records consumed from the space-boundary detection engine.
//!
//! Cross-references between records are plain identifier strings. They are
//! resolved once per load by [`crate::graph::BoundaryGraph`]; nothing here
//! holds a pointer to another record.

use serde::{Deserialize, Serialize};
use zonekit_geometry::{Polyloop, Solid, Vector3};

/// Element kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Wall,
    Slab,
    Door,
    Window,
    Column,
    Beam,
    #[serde(other)]
    Unknown,
}

impl ElementKind {
    /// Doors and windows are emitted as fenestration
    #[inline]
    pub fn is_fenestration(&self) -> bool {
        matches!(self, ElementKind::Door | ElementKind::Window)
    }
}

/// Physical building element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementInfo {
    pub id: String,
    pub kind: ElementKind,
    /// Material/construction reference into the material library
    #[serde(default)]
    pub material_ref: Option<String>,
    #[serde(default)]
    pub geometry: Option<Solid>,
}

/// Enclosed space (room)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceInfo {
    pub id: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    /// Externally assigned zone/group name; trusted as-is
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub geometry: Option<Solid>,
}

/// One layer of a boundary's material stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayer {
    pub material_ref: String,
    pub thickness: f64,
}

/// A surface separating a space from another space, the exterior, or a
/// virtual partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceBoundary {
    pub id: String,
    #[serde(rename = "vertices")]
    pub geometry: Polyloop,
    /// Outward normal as reported by the engine
    pub normal: Vector3<f64>,
    /// Material stack, outermost first
    #[serde(default)]
    pub layers: Vec<MaterialLayer>,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_exterior: bool,
    /// Opaque flag supplied by the engine; never derived from geometry
    #[serde(default)]
    pub connected_to_ground: bool,

    #[serde(default)]
    pub space_id: Option<String>,
    #[serde(default)]
    pub opposite_id: Option<String>,
    #[serde(default)]
    pub containing_id: Option<String>,
    #[serde(default)]
    pub element_id: Option<String>,
}

/// Free-standing shading geometry to be placed on the facade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadingSource {
    pub name: String,
    pub geometry: Solid,
}
