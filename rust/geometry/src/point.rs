// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point construction with ingestion rounding.
//!
//! Coordinates coming from the boundary detection engine carry floating noise
//! in the last few bits. Every point is snapped to [`COORD_DIGITS`] decimals
//! when it enters the model so that shared vertices compare equal.

use nalgebra::{Point3, Vector3};

/// Decimal digits kept for coordinates on ingestion
pub const COORD_DIGITS: i32 = 6;

/// Decimal digits kept for layer thicknesses on ingestion
pub const THICKNESS_DIGITS: i32 = 4;

/// Round a value to a fixed number of decimal digits
#[inline]
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    let rounded = (value * factor).round() / factor;
    // Normalise -0.0 so that component-wise equality holds
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Build a point with every component rounded to [`COORD_DIGITS`]
#[inline]
pub fn round_point(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(
        round_to(x, COORD_DIGITS),
        round_to(y, COORD_DIGITS),
        round_to(z, COORD_DIGITS),
    )
}

/// Round an existing point
#[inline]
pub fn rounded(p: &Point3<f64>) -> Point3<f64> {
    round_point(p.x, p.y, p.z)
}

/// Round a direction/normal vector component-wise
#[inline]
pub fn rounded_vector(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        round_to(v.x, COORD_DIGITS),
        round_to(v.y, COORD_DIGITS),
        round_to(v.z, COORD_DIGITS),
    )
}
