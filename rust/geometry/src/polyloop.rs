// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed vertex rings.
//!
//! A [`Polyloop`] is an ordered, cyclic sequence of points; the last vertex is
//! implicitly connected back to the first. Loops are never closed explicitly
//! (the first point is not repeated at the end).

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::point::rounded;

/// Default distance under which two consecutive vertices are collapsed
pub const CLEAN_EPSILON: f64 = 1e-4;

/// Closed ring of vertices
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyloop {
    vertices: Vec<Point3<f64>>,
}

impl Polyloop {
    /// Create a loop from an ordered vertex list
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        Self { vertices }
    }

    /// Create a loop from raw `[x, y, z]` triples
    pub fn from_coords(coords: &[[f64; 3]]) -> Self {
        Self {
            vertices: coords
                .iter()
                .map(|c| Point3::new(c[0], c[1], c[2]))
                .collect(),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn into_vertices(self) -> Vec<Point3<f64>> {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A loop is valid when it spans at least three vertices
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Collapse near-duplicate consecutive vertices (including the wrap-around
    /// pair) closer than `epsilon`.
    ///
    /// Each vertex is compared against the last *kept* vertex, so after one
    /// pass every consecutive pair is at least `epsilon` apart and a second
    /// pass is a no-op.
    pub fn clean(&self, epsilon: f64) -> Polyloop {
        let mut kept: Vec<Point3<f64>> = Vec::with_capacity(self.vertices.len());

        for p in &self.vertices {
            match kept.last() {
                Some(last) if (p - last).norm() < epsilon => {}
                _ => kept.push(*p),
            }
        }

        while kept.len() > 1 {
            let first = kept[0];
            let last = kept[kept.len() - 1];
            if (last - first).norm() < epsilon {
                kept.pop();
            } else {
                break;
            }
        }

        Polyloop { vertices: kept }
    }

    /// Same loop traversed in the opposite direction
    pub fn reversed(&self) -> Polyloop {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Polyloop { vertices }
    }

    /// Unnormalised polygon normal using Newell's method.
    ///
    /// The magnitude equals twice the polygon area; the direction follows the
    /// right-hand rule relative to the winding order.
    pub fn newell(&self) -> Vector3<f64> {
        let mut normal = Vector3::new(0.0, 0.0, 0.0);
        let n = self.vertices.len();

        for i in 0..n {
            let curr = &self.vertices[i];
            let next = &self.vertices[(i + 1) % n];

            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }

        normal
    }

    /// Unit normal, or `None` for degenerate loops
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let normal = self.newell();
        let len = normal.norm();
        if len < 1e-12 {
            return None;
        }
        Some(normal / len)
    }

    /// Planar polygon area
    pub fn area(&self) -> f64 {
        self.newell().norm() / 2.0
    }

    /// Average of the vertex positions
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut sum = Vector3::new(0.0, 0.0, 0.0);
        for p in &self.vertices {
            sum += p.coords;
        }

        Some(Point3::from(sum / self.vertices.len() as f64))
    }

    /// Length of every edge, `edge[i]` runs from vertex `i` to `i + 1`
    pub fn edge_lengths(&self) -> Vec<f64> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| (self.vertices[(i + 1) % n] - self.vertices[i]).norm())
            .collect()
    }

    pub fn translated(&self, offset: &Vector3<f64>) -> Polyloop {
        Polyloop {
            vertices: self.vertices.iter().map(|p| p + offset).collect(),
        }
    }

    /// Scale about the origin
    pub fn scaled(&self, factor: f64) -> Polyloop {
        Polyloop {
            vertices: self
                .vertices
                .iter()
                .map(|p| Point3::from(p.coords * factor))
                .collect(),
        }
    }

    /// Round every vertex to ingestion precision
    pub fn rounded(&self) -> Polyloop {
        Polyloop {
            vertices: self.vertices.iter().map(rounded).collect(),
        }
    }

    /// Rotate the ring so that it starts at `start`, keeping the cyclic order
    pub fn rotated_to(&self, start: usize) -> Polyloop {
        if self.vertices.is_empty() {
            return self.clone();
        }
        let mut vertices = self.vertices.clone();
        vertices.rotate_left(start % self.vertices.len());
        Polyloop { vertices }
    }

    /// Pull every vertex `distance` towards the loop centroid.
    ///
    /// Vertices closer to the centroid than `distance` are left in place.
    pub fn shrunk_towards_centroid(&self, distance: f64) -> Polyloop {
        let Some(centroid) = self.centroid() else {
            return self.clone();
        };

        Polyloop {
            vertices: self
                .vertices
                .iter()
                .map(|p| {
                    let to_center = centroid - p;
                    let len = to_center.norm();
                    if len > distance {
                        p + to_center * (distance / len)
                    } else {
                        *p
                    }
                })
                .collect(),
        }
    }
}

impl From<Vec<Point3<f64>>> for Polyloop {
    fn from(vertices: Vec<Point3<f64>>) -> Self {
        Self::new(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polyloop {
        Polyloop::from_coords(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
    }

    #[test]
    fn newell_normal_follows_winding() {
        let square = unit_square();
        let n = square.normal().unwrap();
        assert_relative_eq!(n.z, 1.0);

        let n = square.reversed().normal().unwrap();
        assert_relative_eq!(n.z, -1.0);
    }

    #[test]
    fn area_of_square() {
        assert_relative_eq!(unit_square().area(), 1.0);
    }

    #[test]
    fn clean_collapses_near_duplicates() {
        let noisy = Polyloop::from_coords(&[
            [0.0, 0.0, 0.0],
            [0.000_01, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.000_02, 0.0],
        ]);

        let cleaned = noisy.clean(CLEAN_EPSILON);
        assert_eq!(cleaned.len(), 4);
        assert!(cleaned.is_valid());
    }

    #[test]
    fn clean_is_idempotent() {
        let noisy = Polyloop::from_coords(&[
            [0.0, 0.0, 0.0],
            [0.000_06, 0.0, 0.0],
            [0.000_12, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.000_05, 0.0],
        ]);

        let once = noisy.clean(CLEAN_EPSILON);
        let twice = once.clean(CLEAN_EPSILON);
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_can_invalidate_sliver() {
        let sliver = Polyloop::from_coords(&[
            [0.0, 0.0, 0.0],
            [0.000_01, 0.0, 0.0],
            [0.000_02, 0.000_01, 0.0],
        ]);
        assert!(!sliver.clean(CLEAN_EPSILON).is_valid());
    }

    #[test]
    fn double_reverse_is_identity() {
        let square = unit_square();
        assert_eq!(square.reversed().reversed(), square);
    }

    #[test]
    fn rotation_keeps_cyclic_order() {
        let square = unit_square();
        let rotated = square.rotated_to(2);
        assert_eq!(rotated.vertices()[0], square.vertices()[2]);
        assert_eq!(rotated.vertices()[1], square.vertices()[3]);
        assert_eq!(rotated.vertices()[2], square.vertices()[0]);
        assert_eq!(rotated.vertices()[3], square.vertices()[1]);
    }

    #[test]
    fn shrink_moves_vertices_inward() {
        let square = unit_square();
        let shrunk = square.shrunk_towards_centroid(0.01);
        let centroid = square.centroid().unwrap();
        for (before, after) in square.vertices().iter().zip(shrunk.vertices()) {
            let d_before = (centroid - before).norm();
            let d_after = (centroid - after).norm();
            assert_relative_eq!(d_before - d_after, 0.01, epsilon = 1e-12);
        }
    }

    #[test]
    fn serde_as_coordinate_list() {
        let json = "[[0.0,0.0,0.0],[1.0,0.0,0.0],[1.0,1.0,0.0]]";
        let parsed: Polyloop = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.vertices()[1], Point3::new(1.0, 0.0, 0.0));
    }
}
