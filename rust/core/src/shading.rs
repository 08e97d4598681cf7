// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shading placement against the building envelope.
//!
//! Free-standing shading solids (fins, overhangs, balconies) are detected a
//! small gap away from the facade. Each solid is moved onto the nearest
//! exterior wall whose plane faces one of its faces, and that face is
//! dropped because it would coincide with the wall.

use zonekit_geometry::{Face, Plane};

use crate::error::{Error, Result};
use crate::model::ShadingSource;

/// Maximum gap between a shading face and a wall that is still snapped
pub const MAX_SNAP_DISTANCE: f64 = 0.5;

/// Cosine tolerance for treating two normals as opposite
pub const ANTIPARALLEL_TOLERANCE: f64 = 1e-3;

/// Shading geometry ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedShading {
    pub source: String,
    pub faces: Vec<Face>,
}

/// Candidate anchoring of one shading face on one wall
#[derive(Debug, Clone, Copy)]
struct Anchor {
    face: usize,
    wall: usize,
    distance: f64,
}

/// Snap a shading solid onto the closest facing exterior wall.
///
/// `walls` are the planes of exterior walls with outward normals. Fails with
/// [`Error::FacadeAnchor`] when no face is antiparallel to a wall within
/// `max_snap` in front of it.
pub fn project_shading(source: &ShadingSource, walls: &[Plane], max_snap: f64) -> Result<ProjectedShading> {
    let faces = source.geometry.to_faces();

    let mut best: Option<Anchor> = None;
    for (face_idx, face) in faces.iter().enumerate() {
        let Some(normal) = face.normal() else {
            continue;
        };
        let Some(first) = face.outer.vertices().first() else {
            continue;
        };

        for (wall_idx, wall) in walls.iter().enumerate() {
            if !wall.is_antiparallel(&normal, ANTIPARALLEL_TOLERANCE) {
                continue;
            }

            // Negative: the face already sits behind the wall plane
            let distance = wall.signed_distance(first);
            if distance < 0.0 || distance > max_snap {
                continue;
            }

            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Anchor {
                    face: face_idx,
                    wall: wall_idx,
                    distance,
                });
            }
        }
    }

    let Some(anchor) = best else {
        return Err(Error::FacadeAnchor {
            source_name: source.name.clone(),
        });
    };

    let offset = -walls[anchor.wall].normal * anchor.distance;
    let faces = faces
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != anchor.face)
        .map(|(_, f)| f.translated(&offset))
        .collect();

    tracing::debug!(
        source = %source.name,
        distance = anchor.distance,
        "Anchored shading to facade"
    );

    Ok(ProjectedShading {
        source: source.name.clone(),
        faces,
    })
}
