// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ZoneKit Geometry
//!
//! Polygon loops, faces and solids used by the space-boundary zone model,
//! with nalgebra for vector math.

pub mod error;
pub mod extrusion;
pub mod face;
pub mod plane;
pub mod point;
pub mod polyloop;
pub mod solid;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use extrusion::Extrusion;
pub use face::Face;
pub use plane::Plane;
pub use point::{round_point, round_to, rounded_vector, COORD_DIGITS, THICKNESS_DIGITS};
pub use polyloop::{Polyloop, CLEAN_EPSILON};
pub use solid::Solid;
