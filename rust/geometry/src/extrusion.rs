// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion decomposition - converting a swept face into explicit faces

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::face::Face;
use crate::polyloop::Polyloop;

/// A base face swept along `direction` by `depth`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    pub base: Face,
    /// Sweep direction, not necessarily unit length
    pub direction: Vector3<f64>,
    pub depth: f64,
}

impl Extrusion {
    /// Create an extrusion, rejecting zero-length sweep directions
    pub fn new(base: Face, direction: Vector3<f64>, depth: f64) -> Result<Self> {
        let extrusion = Self {
            base,
            direction,
            depth,
        };
        extrusion.validate()?;
        Ok(extrusion)
    }

    /// Check parameters of an extrusion built without [`Extrusion::new`]
    /// (e.g. deserialized)
    pub fn validate(&self) -> Result<()> {
        if self.direction.norm() < 1e-12 {
            return Err(Error::InvalidExtrusion(
                "Direction must have non-zero length".to_string(),
            ));
        }
        if !self.depth.is_finite() {
            return Err(Error::InvalidExtrusion(format!("Depth {} is not finite", self.depth)));
        }
        Ok(())
    }

    /// Vector from the base to the top face
    #[inline]
    pub fn offset(&self) -> Vector3<f64> {
        self.direction.normalize() * self.depth
    }

    /// Decompose into explicit faces: bottom, top, then one side per edge of
    /// the outer ring and of every void ring.
    ///
    /// Face count is `2 + outer.len() + sum(void.len())`.
    pub fn to_faces(&self) -> Vec<Face> {
        let bottom = self.outward_base();
        let offset = self.offset();

        // Reverse of the bottom: winds along the sweep direction
        let swept = bottom.reversed();
        let top = swept.translated(&offset);

        let mut faces = Vec::with_capacity(2 + bottom.vertex_count());
        faces.push(bottom);
        faces.push(top.clone());

        push_side_faces(&swept.outer, &offset, &mut faces);
        for void in &swept.voids {
            push_side_faces(void, &offset, &mut faces);
        }

        faces
    }

    /// Base face oriented so its normal points away from the sweep.
    ///
    /// If `|n + d|^2 <= |n|^2 + |d|^2` the stored base already faces away
    /// from the sweep direction; otherwise it is reversed. Voids are
    /// re-wound against the outer ring.
    fn outward_base(&self) -> Face {
        let n = self.base.outer.newell();
        let d = self.direction;

        let combined = (n + d).norm_squared();
        let base = if combined <= n.norm_squared() + d.norm_squared() {
            self.base.clone()
        } else {
            self.base.reversed()
        };

        let outer_normal = base.outer.newell();
        let voids = base
            .voids
            .iter()
            .map(|v| {
                if v.newell().dot(&outer_normal) > 0.0 {
                    v.reversed()
                } else {
                    v.clone()
                }
            })
            .collect();

        Face::with_voids(base.outer, voids)
    }
}

/// One quad `[top_i, base_i, base_i+1, top_i+1]` per ring edge.
///
/// `ring` must wind along the sweep direction for the quads to face outward.
fn push_side_faces(ring: &Polyloop, offset: &Vector3<f64>, faces: &mut Vec<Face>) {
    let base = ring.vertices();
    let n = base.len();

    for i in 0..n {
        let j = (i + 1) % n;
        let quad = vec![base[i] + offset, base[i], base[j], base[j] + offset];
        faces.push(Face::new(Polyloop::new(quad)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn diamond() -> Face {
        Face::new(Polyloop::from_coords(&[
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]))
    }

    fn solid_centroid(faces: &[Face]) -> Point3<f64> {
        let mut sum = Vector3::zeros();
        let mut count = 0.0;
        for face in faces {
            for p in face.outer.vertices() {
                sum += p.coords;
                count += 1.0;
            }
        }
        Point3::from(sum / count)
    }

    #[test]
    fn diamond_extrusion_has_six_faces() {
        let ext = Extrusion::new(diamond(), Vector3::new(0.0, 0.0, 1.0), 1.0).unwrap();
        let faces = ext.to_faces();
        assert_eq!(faces.len(), 6);
    }

    #[test]
    fn all_faces_point_outward() {
        for base in [diamond(), diamond().reversed()] {
            let ext = Extrusion::new(base, Vector3::new(0.0, 0.0, 2.0), 3.0).unwrap();
            let faces = ext.to_faces();
            let center = solid_centroid(&faces);

            for face in &faces {
                let normal = face.normal().unwrap();
                let to_face = face.outer.centroid().unwrap() - center;
                assert!(normal.dot(&to_face) > 0.0, "inward face: {:?}", face);
            }
        }
    }

    #[test]
    fn top_is_offset_by_unit_direction_times_depth() {
        let ext = Extrusion::new(diamond(), Vector3::new(0.0, 0.0, 5.0), 2.5).unwrap();
        let faces = ext.to_faces();
        let top = &faces[1];
        for p in top.outer.vertices() {
            assert_relative_eq!(p.z, 2.5);
        }
        assert_relative_eq!(top.normal().unwrap().z, 1.0);
        assert_relative_eq!(faces[0].normal().unwrap().z, -1.0);
    }

    #[test]
    fn voids_add_side_faces() {
        let outer = Polyloop::from_coords(&[
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [4.0, 4.0, 0.0],
            [0.0, 4.0, 0.0],
        ]);
        let hole_a = Polyloop::from_coords(&[[1.0, 1.0, 0.0], [2.0, 1.0, 0.0], [2.0, 2.0, 0.0]]);
        let hole_b = Polyloop::from_coords(&[
            [2.5, 2.5, 0.0],
            [2.5, 3.5, 0.0],
            [3.5, 3.5, 0.0],
            [3.5, 2.5, 0.0],
            [3.0, 2.2, 0.0],
        ]);
        let base = Face::with_voids(outer, vec![hole_a, hole_b]);
        let ext = Extrusion::new(base, Vector3::new(0.0, 0.0, 1.0), 1.0).unwrap();

        assert_eq!(ext.to_faces().len(), 2 + 4 + 3 + 5);
    }

    #[test]
    fn void_sides_face_into_the_hole() {
        let outer = Polyloop::from_coords(&[
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [4.0, 4.0, 0.0],
            [0.0, 4.0, 0.0],
        ]);
        // Same winding as the outer ring on purpose
        let hole = Polyloop::from_coords(&[
            [1.0, 1.0, 0.0],
            [3.0, 1.0, 0.0],
            [3.0, 3.0, 0.0],
            [1.0, 3.0, 0.0],
        ]);
        let hole_center = Point3::new(2.0, 2.0, 0.5);
        let ext = Extrusion::new(
            Face::with_voids(outer, vec![hole]),
            Vector3::new(0.0, 0.0, 1.0),
            1.0,
        )
        .unwrap();

        let faces = ext.to_faces();
        for face in &faces[6..] {
            let normal = face.normal().unwrap();
            let to_hole = hole_center - face.outer.centroid().unwrap();
            assert!(normal.dot(&to_hole) > 0.0);
        }
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Extrusion::new(diamond(), Vector3::zeros(), 1.0).is_err());
    }

    #[test]
    fn triangle_base_gives_five_faces() {
        let tri = Face::new(Polyloop::from_coords(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]));
        let ext = Extrusion::new(tri, Vector3::new(1.0, 0.0, 0.0), 0.2).unwrap();
        assert_eq!(ext.to_faces().len(), 5);
    }
}
