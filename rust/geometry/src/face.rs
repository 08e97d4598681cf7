// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar faces with optional voids

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::polyloop::Polyloop;

/// One outer boundary plus zero or more holes.
///
/// Voids are assumed to lie inside the outer boundary; this is not verified.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Face {
    pub outer: Polyloop,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub voids: Vec<Polyloop>,
}

impl Face {
    /// Create a face without holes
    pub fn new(outer: Polyloop) -> Self {
        Self {
            outer,
            voids: Vec::new(),
        }
    }

    pub fn with_voids(outer: Polyloop, voids: Vec<Polyloop>) -> Self {
        Self { outer, voids }
    }

    /// Reverse the outer ring and every void ring
    pub fn reversed(&self) -> Face {
        Face {
            outer: self.outer.reversed(),
            voids: self.voids.iter().map(Polyloop::reversed).collect(),
        }
    }

    /// Unit normal of the outer ring
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.outer.normal()
    }

    /// Unit normal of the outer ring, failing on degenerate faces
    pub fn try_normal(&self) -> Result<Vector3<f64>> {
        self.outer.normal().ok_or_else(|| {
            Error::DegenerateLoop(format!(
                "face with {} vertices has no defined normal",
                self.outer.len()
            ))
        })
    }

    pub fn translated(&self, offset: &Vector3<f64>) -> Face {
        Face {
            outer: self.outer.translated(offset),
            voids: self.voids.iter().map(|v| v.translated(offset)).collect(),
        }
    }

    pub fn scaled(&self, factor: f64) -> Face {
        Face {
            outer: self.outer.scaled(factor),
            voids: self.voids.iter().map(|v| v.scaled(factor)).collect(),
        }
    }

    pub fn rounded(&self) -> Face {
        Face {
            outer: self.outer.rounded(),
            voids: self.voids.iter().map(Polyloop::rounded).collect(),
        }
    }

    /// Total vertex count over the outer ring and all voids
    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.voids.iter().map(Polyloop::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_with_hole() -> Face {
        Face::with_voids(
            Polyloop::from_coords(&[
                [0.0, 0.0, 0.0],
                [4.0, 0.0, 0.0],
                [4.0, 4.0, 0.0],
                [0.0, 4.0, 0.0],
            ]),
            vec![Polyloop::from_coords(&[
                [1.0, 1.0, 0.0],
                [1.0, 2.0, 0.0],
                [2.0, 2.0, 0.0],
            ])],
        )
    }

    #[test]
    fn double_reverse_restores_face() {
        let face = face_with_hole();
        assert_eq!(face.reversed().reversed(), face);
        assert_ne!(face.reversed(), face);
    }

    #[test]
    fn vertex_count_includes_voids() {
        assert_eq!(face_with_hole().vertex_count(), 7);
    }

    #[test]
    fn degenerate_face_has_no_normal() {
        let line = Face::new(Polyloop::from_coords(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
        ]));
        assert!(line.try_normal().is_err());
    }
}
