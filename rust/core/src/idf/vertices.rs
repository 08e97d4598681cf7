// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Starting-vertex rules and degeneracy filtering for surface rings.
//!
//! With `UpperLeftCorner` geometry rules every ring starts at a fixed
//! extremal vertex. The cyclic order (and so the normal) is never changed.

use zonekit_geometry::{Point3, Polyloop, Vector3, CLEAN_EPSILON};

use crate::classify::SurfaceType;

/// Edges shorter than this count as degenerate (metres)
pub const MIN_EDGE_LENGTH: f64 = 0.01;

/// Tolerance when comparing the primary ordering key
const KEY_TOLERANCE: f64 = 1e-6;

/// Clean a ring and rotate it to its starting vertex.
///
/// Returns `None` for degenerate rings: fewer than three vertices after
/// cleaning, or more than `n - 2` edges shorter than [`MIN_EDGE_LENGTH`].
pub fn prepare_ring(ring: &Polyloop, surface_type: SurfaceType, normal: &Vector3<f64>) -> Option<Polyloop> {
    let cleaned = ring.clean(CLEAN_EPSILON);
    if is_degenerate(&cleaned) {
        return None;
    }
    let start = start_index(cleaned.vertices(), surface_type, normal);
    Some(cleaned.rotated_to(start))
}

/// Degenerate rings are omitted from the output
pub fn is_degenerate(ring: &Polyloop) -> bool {
    let n = ring.len();
    if n < 3 {
        return true;
    }
    let short = ring
        .edge_lengths()
        .into_iter()
        .filter(|&l| l < MIN_EDGE_LENGTH)
        .count();
    short > n - 2
}

/// Index of the starting vertex for a surface type.
///
/// - Floor: rightmost (max x), then lowest (min y)
/// - Ceiling/Roof: farthest (max y), then rightmost (max x)
/// - Wall: topmost (max z), then leftmost as seen from outside
pub fn start_index(vertices: &[Point3<f64>], surface_type: SurfaceType, normal: &Vector3<f64>) -> usize {
    match surface_type {
        SurfaceType::Floor => extremal(vertices, |p| (p.x, -p.y)),
        SurfaceType::Ceiling | SurfaceType::Roof => extremal(vertices, |p| (p.y, p.x)),
        SurfaceType::Wall => {
            // Viewer looks along -normal with z up
            let right = (-normal).cross(&Vector3::z());
            extremal(vertices, |p| (p.z, -p.coords.dot(&right)))
        }
    }
}

/// Index maximising `key` lexicographically, first component compared with
/// a tolerance. Ties keep the earliest vertex.
fn extremal<F>(vertices: &[Point3<f64>], key: F) -> usize
where
    F: Fn(&Point3<f64>) -> (f64, f64),
{
    let mut best = 0;
    let Some(first) = vertices.first() else {
        return best;
    };
    let mut best_key = key(first);

    for (i, p) in vertices.iter().enumerate().skip(1) {
        let k = key(p);
        let better = if (k.0 - best_key.0).abs() > KEY_TOLERANCE {
            k.0 > best_key.0
        } else {
            k.1 > best_key.1 + KEY_TOLERANCE
        };
        if better {
            best = i;
            best_key = k;
        }
    }
    best
}
