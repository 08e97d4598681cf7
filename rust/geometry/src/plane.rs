// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infinite planes for distance queries

use nalgebra::{Point3, Vector3};

/// Plane through a point with a unit normal
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Point on the plane
    pub point: Point3<f64>,
    /// Normal vector (normalized on construction)
    pub normal: Vector3<f64>,
}

impl Plane {
    /// Create a new plane
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Signed distance from point to plane.
    /// Positive = in front (normal side), Negative = behind
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (point - self.point).dot(&self.normal)
    }

    /// Check whether a direction points against the plane normal within
    /// `tolerance` (compared on the cosine of the angle)
    pub fn is_antiparallel(&self, direction: &Vector3<f64>, tolerance: f64) -> bool {
        let len = direction.norm();
        if len == 0.0 {
            return false;
        }
        self.normal.dot(direction) / len <= -1.0 + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn signed_distance_sides() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, -2.0, 0.0));
        assert_relative_eq!(plane.signed_distance(&Point3::new(5.0, -0.5, 1.0)), 0.5);
        assert_relative_eq!(plane.signed_distance(&Point3::new(5.0, 0.25, 1.0)), -0.25);
    }

    #[test]
    fn antiparallel_check() {
        let plane = Plane::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        assert!(plane.is_antiparallel(&Vector3::new(-3.0, 0.0, 0.0), 1e-6));
        assert!(!plane.is_antiparallel(&Vector3::new(-1.0, 1.0, 0.0), 1e-6));
        assert!(!plane.is_antiparallel(&Vector3::new(1.0, 0.0, 0.0), 1e-6));
    }
}
