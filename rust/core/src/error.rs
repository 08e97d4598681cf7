// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for zone model processing.

use crate::graph::Relation;

/// Result type alias for zone model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or serializing a zone model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A boundary references an identifier missing from its lookup table.
    ///
    /// Indicates an inconsistent graph from the detection engine; fatal.
    #[error("boundary {boundary} references unknown {relation} '{target}'")]
    UnresolvedReference {
        relation: Relation,
        boundary: String,
        target: String,
    },

    /// The same identifier appears twice in one input collection.
    #[error("duplicate {collection} identifier '{id}'")]
    DuplicateIdentifier { collection: &'static str, id: String },

    /// A construction was requested for an empty layer list.
    #[error("construction requested with no material layers")]
    EmptyConstruction,

    /// Shading geometry could not be matched to any exterior wall.
    #[error("could not anchor shading '{source_name}' to a facade")]
    FacadeAnchor { source_name: String },

    /// The input document is structurally invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("geometry error: {0}")]
    Geometry(#[from] zonekit_geometry::Error),
}
