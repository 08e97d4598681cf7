// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ZoneKit Core
//!
//! Turns the space-boundary graph produced by a building-model boundary
//! detection engine into a thermal-zone model serialized as an EnergyPlus
//! input data file (IDF).
//!
//! ## Overview
//!
//! - **Boundary graph**: identifier cross-references resolved once into
//!   index links ([`BoundaryGraph`])
//! - **Classification**: surface type and outside boundary condition derived
//!   from normals and graph links ([`classify`])
//! - **Constructions**: layer stacks deduplicated by ordered layer names
//!   ([`ConstructionSet`])
//! - **Zones**: deterministic, collision-free zone naming ([`resolve_zone_names`])
//! - **Shading**: free-standing shading snapped onto exterior walls
//!   ([`project_shading`])
//! - **IDF**: records rendered in a fixed emission order ([`IdfModel`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zonekit_core::{EngineDocument, EventLog, MaterialLibrary, Pipeline, SimulationSettings};
//!
//! let document = EngineDocument::from_json(&json)?;
//! let pipeline = Pipeline::new(MaterialLibrary::new(), SimulationSettings::default());
//! let log = EventLog::new();
//! let outcome = pipeline.run_reporting(document, &log);
//!
//! if let Some(model) = outcome.model {
//!     model.write_to(Path::new("model.idf"))?;
//! }
//! ```

pub mod classify;
pub mod constructions;
pub mod error;
pub mod events;
pub mod graph;
pub mod idf;
pub mod input;
pub mod materials;
pub mod model;
pub mod pipeline;
pub mod settings;
pub mod shading;
pub mod zones;

pub use classify::{boundary_condition, surface_type, BoundaryCondition, SurfaceType};
pub use constructions::{ConstructionSet, OutputConstruction, OutputLayer, UNMAPPED_CONSTRUCTION};
pub use error::{Error, Result};
pub use events::{Event, EventLog, EventSink, Reporter, RunStatus, Severity};
pub use graph::{BoundaryGraph, BoundaryLinks, Level, Relation};
pub use idf::{IdfModel, IdfObject};
pub use input::{EngineDocument, IngestedModel};
pub use materials::{LibraryMaterial, MaterialLibrary, MaterialProperties, Roughness};
pub use model::{ElementInfo, ElementKind, MaterialLayer, ShadingSource, SpaceBoundary, SpaceInfo};
pub use pipeline::{ModelSummary, Pipeline, RunOutcome};
pub use settings::{Location, RunPeriod, SimulationSettings};
pub use shading::{project_shading, ProjectedShading, MAX_SNAP_DISTANCE};
pub use zones::{resolve_zone_names, ZoneNames};
