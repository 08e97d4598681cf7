// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid geometry attached to elements, spaces and shading devices.
//!
//! The set of representations is closed: a swept [`Extrusion`] or an explicit
//! boundary representation. Both decompose to a plain face list through
//! [`Solid::to_faces`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extrusion::Extrusion;
use crate::face::Face;

/// Solid representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Solid {
    Extrusion(Extrusion),
    Brep { faces: Vec<Face> },
}

impl Solid {
    /// Explicit face list of the solid
    pub fn to_faces(&self) -> Vec<Face> {
        match self {
            Solid::Extrusion(ext) => ext.to_faces(),
            Solid::Brep { faces } => faces.clone(),
        }
    }

    /// Reject representations that cannot be decomposed
    pub fn validate(&self) -> Result<()> {
        match self {
            Solid::Extrusion(ext) => ext.validate(),
            Solid::Brep { .. } => Ok(()),
        }
    }

    /// Uniformly scale about the origin (used for length unit conversion)
    pub fn scale(&self, factor: f64) -> Solid {
        match self {
            Solid::Extrusion(ext) => Solid::Extrusion(Extrusion {
                base: ext.base.scaled(factor),
                direction: ext.direction,
                depth: ext.depth * factor,
            }),
            Solid::Brep { faces } => Solid::Brep {
                faces: faces.iter().map(|f| f.scaled(factor)).collect(),
            },
        }
    }

    /// Round every stored coordinate to ingestion precision
    pub fn rounded(&self) -> Solid {
        match self {
            Solid::Extrusion(ext) => Solid::Extrusion(Extrusion {
                base: ext.base.rounded(),
                direction: ext.direction,
                depth: ext.depth,
            }),
            Solid::Brep { faces } => Solid::Brep {
                faces: faces.iter().map(Face::rounded).collect(),
            },
        }
    }

    /// Number of faces `to_faces` yields without computing them
    pub fn face_count(&self) -> usize {
        match self {
            Solid::Extrusion(ext) => 2 + ext.base.vertex_count(),
            Solid::Brep { faces } => faces.len(),
        }
    }
}
