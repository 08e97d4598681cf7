// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end conversion: engine document to IDF model.
//!
//! Stages run sequentially on the calling thread:
//! ingest, resolve the boundary graph, name zones, classify and assign
//! constructions, anchor shading, assemble the output model.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use zonekit_geometry::{Plane, Polyloop, CLEAN_EPSILON};

use crate::classify::{self, BoundaryCondition, SurfaceType};
use crate::constructions::{ConstructionSet, OutputConstruction};
use crate::error::Result;
use crate::events::{EventSink, Reporter, RunStatus};
use crate::graph::{BoundaryGraph, Level};
use crate::idf::vertices::{is_degenerate, prepare_ring};
use crate::idf::{
    FenestrationRecord, FenestrationType, IdfModel, ShadingRecord, SurfaceRecord,
    AIR_BOUNDARY_CONSTRUCTION,
};
use crate::input::{EngineDocument, IngestedModel};
use crate::materials::MaterialLibrary;
use crate::model::{ElementKind, ShadingSource};
use crate::settings::SimulationSettings;
use crate::shading::project_shading;
use crate::zones::{resolve_zone_names, sanitize, UniqueNames, ZoneNames};

/// Counts describing one finished conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSummary {
    pub zones: usize,
    pub surfaces: usize,
    pub fenestrations: usize,
    pub shading_faces: usize,
    pub constructions: usize,
    pub materials: usize,
    /// Surfaces dropped as geometrically degenerate
    pub omitted_surfaces: usize,
    /// Shading sources that could not be anchored
    pub dropped_shading: usize,
    /// Boundaries per level 2, 3, 4
    pub levels: [usize; 3],
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} zones, {} surfaces, {} fenestrations, {} shading faces, {} constructions, {} materials ({} degenerate surfaces omitted)",
            self.zones,
            self.surfaces,
            self.fenestrations,
            self.shading_faces,
            self.constructions,
            self.materials,
            self.omitted_surfaces
        )
    }
}

/// Result of a reported run. The model is absent when the run failed.
#[derive(Debug)]
pub struct RunOutcome {
    pub model: Option<IdfModel>,
    pub summary: Option<ModelSummary>,
    pub status: RunStatus,
}

/// How a boundary ends up in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Surface,
    Fenestration,
}

/// A boundary that survived filtering
#[derive(Debug, Clone)]
struct Prepared {
    role: Role,
    name: String,
    zone: String,
    surface_type: SurfaceType,
    vertices: Polyloop,
    construction: String,
    glazed: bool,
}

/// Conversion pipeline configured with a material library and settings
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    library: MaterialLibrary,
    settings: SimulationSettings,
}

impl Pipeline {
    pub fn new(library: MaterialLibrary, settings: SimulationSettings) -> Self {
        Self { library, settings }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Load and convert a document file, catching every failure
    pub fn run_file(&self, path: &Path, sink: &dyn EventSink) -> RunOutcome {
        self.reported(sink, |reporter| {
            reporter.notify(format!("Reading {}", path.display()));
            let document = EngineDocument::load(path)?;
            self.run(document, reporter)
        })
    }

    /// Convert a document, catching every failure
    pub fn run_reporting(&self, document: EngineDocument, sink: &dyn EventSink) -> RunOutcome {
        self.reported(sink, |reporter| self.run(document, reporter))
    }

    fn reported<F>(&self, sink: &dyn EventSink, work: F) -> RunOutcome
    where
        F: FnOnce(&Reporter) -> Result<(IdfModel, ModelSummary)>,
    {
        let reporter = Reporter::new(sink);
        match work(&reporter) {
            Ok((model, summary)) => {
                let status = reporter.status();
                reporter.notify(format!("Conversion finished: {}", status.as_str()));
                RunOutcome {
                    model: Some(model),
                    summary: Some(summary),
                    status,
                }
            }
            Err(e) => {
                reporter.error(format!("Conversion failed: {e}"));
                RunOutcome {
                    model: None,
                    summary: None,
                    status: reporter.status(),
                }
            }
        }
    }

    /// Convert a document. Data-integrity defects abort with an error;
    /// anchoring failures and mapping gaps are reported as warnings.
    pub fn run(&self, document: EngineDocument, reporter: &Reporter) -> Result<(IdfModel, ModelSummary)> {
        let IngestedModel {
            elements,
            spaces,
            boundaries,
            shading,
        } = document.ingest()?;

        reporter.notify(format!(
            "Resolving {} boundaries, {} spaces, {} elements",
            boundaries.len(),
            spaces.len(),
            elements.len()
        ));
        let graph = BoundaryGraph::build(elements, spaces, boundaries)?;

        let zones = resolve_zone_names(graph.referenced_spaces());
        reporter.notify(format!("Named {} zones", zones.len()));

        let mut summary = ModelSummary {
            zones: zones.len(),
            ..ModelSummary::default()
        };
        for i in 0..graph.boundary_count() {
            let slot = match graph.level(i) {
                Level::Paired => 0,
                Level::Unpaired => 1,
                Level::SameSpace => 2,
            };
            summary.levels[slot] += 1;
        }

        // Surfaces, fenestration and shading share one name space
        let mut names = UniqueNames::default();
        let (set, prepared, air_boundary) =
            self.prepare(&graph, &zones, &mut names, reporter, &mut summary);

        let mut model = IdfModel::with_settings(&self.settings);
        for zone in zones.zones() {
            model.push_zone(zone);
        }

        let mut walls = Vec::new();
        for (i, entry) in prepared.iter().enumerate() {
            let Some(entry) = entry.as_ref().filter(|e| e.role == Role::Surface) else {
                continue;
            };

            let condition = match classify::boundary_condition(&graph, i, &zones) {
                BoundaryCondition::Surface { opposite } if !is_surface(&prepared, opposite) => {
                    tracing::debug!(surface = %entry.name, "Matching surface omitted, using adiabatic");
                    BoundaryCondition::Adiabatic
                }
                condition => condition,
            };
            let outside_object = match condition {
                BoundaryCondition::Surface { opposite } => {
                    prepared[opposite].as_ref().map(|o| o.name.clone())
                }
                _ => None,
            };

            if condition.is_outdoors() && entry.surface_type == SurfaceType::Wall {
                if let Some(plane) = wall_plane(&graph, i, &entry.vertices) {
                    walls.push(plane);
                }
            }

            model.push_surface(&SurfaceRecord {
                name: entry.name.clone(),
                surface_type: entry.surface_type,
                construction: entry.construction.clone(),
                zone: entry.zone.clone(),
                boundary_condition: condition,
                outside_object,
                vertices: entry.vertices.clone(),
            });
            summary.surfaces += 1;
        }

        for (i, entry) in prepared.iter().enumerate() {
            let Some(entry) = entry.as_ref().filter(|e| e.role == Role::Fenestration) else {
                continue;
            };

            let host = graph
                .links(i)
                .containing
                .filter(|&h| is_surface(&prepared, h))
                .and_then(|h| prepared[h].as_ref());
            let Some(host) = host else {
                reporter.warn(format!(
                    "Fenestration {} has no containing surface in the output; dropped",
                    entry.name
                ));
                continue;
            };

            // Only pair with a fenestration on the far side of a paired host
            let outside_object = graph
                .links(i)
                .opposite
                .filter(|&o| {
                    prepared[o].as_ref().is_some_and(|p| p.role == Role::Fenestration)
                        && matches!(
                            classify::boundary_condition(&graph, i, &zones),
                            BoundaryCondition::Surface { .. }
                        )
                })
                .and_then(|o| prepared[o].as_ref().map(|p| p.name.clone()));

            let kind = graph.element(i).map(|e| e.kind);
            let fenestration_type = match kind {
                Some(ElementKind::Door) if entry.glazed => FenestrationType::GlassDoor,
                Some(ElementKind::Door) => FenestrationType::Door,
                _ => FenestrationType::Window,
            };

            model.push_fenestration(&FenestrationRecord {
                name: entry.name.clone(),
                fenestration_type,
                construction: entry.construction.clone(),
                host: host.name.clone(),
                outside_object,
                vertices: entry.vertices.clone(),
            });
            summary.fenestrations += 1;
        }

        tracing::debug!(walls = walls.len(), sources = shading.len(), "Anchoring shading");
        let mut source_names = UniqueNames::default();
        for source in &shading {
            match self.place_shading(source, &walls, &mut source_names, &mut names) {
                Ok(records) => {
                    for record in &records {
                        model.push_shading(record);
                    }
                    summary.shading_faces += records.len();
                }
                Err(e) => {
                    reporter.warn(e.to_string());
                    summary.dropped_shading += 1;
                }
            }
        }

        for reference in set.unmapped_references() {
            reporter.warn(format!(
                "Material '{reference}' is not in the library; using placeholder layer"
            ));
        }

        model.push_constructions(&set, air_boundary);
        summary.constructions = model.constructions.len();
        summary.materials = model.materials.len();

        tracing::info!(
            zones = summary.zones,
            surfaces = summary.surfaces,
            fenestrations = summary.fenestrations,
            shading_faces = summary.shading_faces,
            omitted = summary.omitted_surfaces,
            "Model assembled"
        );
        reporter.notify(summary.to_string());

        Ok((model, summary))
    }

    /// Filter, orient and assign constructions to every boundary.
    ///
    /// The construction set is threaded through the loop as an accumulator.
    fn prepare(
        &self,
        graph: &BoundaryGraph,
        zones: &ZoneNames,
        names: &mut UniqueNames,
        reporter: &Reporter,
        summary: &mut ModelSummary,
    ) -> (ConstructionSet, Vec<Option<Prepared>>, bool) {
        let mut set = ConstructionSet::new();
        let mut prepared = Vec::with_capacity(graph.boundary_count());
        let mut air_boundary = false;

        for i in 0..graph.boundary_count() {
            let boundary = graph.boundary(i);
            let name = sanitize(&boundary.id).unwrap_or_else(|| boundary.id.clone());

            let Some(zone) = classify::zone_of(graph, i, zones) else {
                // Exterior-side counterparts carry no space of their own
                if boundary.is_exterior {
                    tracing::trace!(boundary = %name, "Skipping exterior counterpart");
                } else {
                    reporter.warn(format!("Boundary {name} bounds no space; skipped"));
                }
                prepared.push(None);
                continue;
            };

            let role = if graph.element(i).is_some_and(|e| e.kind.is_fenestration()) {
                Role::Fenestration
            } else {
                Role::Surface
            };
            let surface_type = classify::surface_type(graph, i);

            let ring = match role {
                Role::Fenestration => boundary
                    .geometry
                    .shrunk_towards_centroid(self.settings.fenestration_inset)
                    .rounded(),
                Role::Surface => boundary.geometry.clone(),
            };
            let Some(vertices) = prepare_ring(&ring, surface_type, &boundary.normal) else {
                tracing::debug!(boundary = %name, "Omitting degenerate surface");
                summary.omitted_surfaces += 1;
                prepared.push(None);
                continue;
            };

            let (construction, glazed) = if boundary.is_virtual && boundary.layers.is_empty() {
                air_boundary = true;
                (AIR_BOUNDARY_CONSTRUCTION.to_string(), false)
            } else {
                let (next, resolved) = set.resolve(&boundary.layers, &self.library);
                let (next, construction): (ConstructionSet, Arc<OutputConstruction>) = match resolved {
                    Ok(c) => (next, c),
                    Err(e) => {
                        reporter.warn(format!("Boundary {name}: {e}; using placeholder construction"));
                        next.placeholder()
                    }
                };
                set = next;
                (construction.name.clone(), construction.is_glazed())
            };

            prepared.push(Some(Prepared {
                role,
                name: names.claim(&name),
                zone: zone.to_string(),
                surface_type,
                vertices,
                construction,
                glazed,
            }));
        }

        (set, prepared, air_boundary)
    }

    /// Anchor one shading source and turn its faces into records.
    ///
    /// Sources sharing a name get distinct prefixes; face names are claimed
    /// against everything already written.
    fn place_shading(
        &self,
        source: &ShadingSource,
        walls: &[Plane],
        source_names: &mut UniqueNames,
        names: &mut UniqueNames,
    ) -> Result<Vec<ShadingRecord>> {
        let projected = project_shading(source, walls, self.settings.max_snap_distance)?;
        let base = sanitize(&projected.source).unwrap_or_else(|| "Shading".to_string());
        let base = source_names.claim(&base);

        Ok(projected
            .faces
            .iter()
            .map(|face| face.outer.rounded().clean(CLEAN_EPSILON))
            .filter(|ring| !is_degenerate(ring))
            .enumerate()
            .map(|(k, vertices)| ShadingRecord {
                name: names.claim(&format!("{base} {}", k + 1)),
                vertices,
            })
            .collect())
    }
}

/// The boundary was kept as a building surface
fn is_surface(prepared: &[Option<Prepared>], index: usize) -> bool {
    prepared
        .get(index)
        .and_then(Option::as_ref)
        .is_some_and(|p| p.role == Role::Surface)
}

/// Plane of an exterior wall with its outward normal
fn wall_plane(graph: &BoundaryGraph, index: usize, vertices: &Polyloop) -> Option<Plane> {
    let normal = graph.boundary(index).normal;
    if normal.norm() == 0.0 {
        return None;
    }
    vertices.vertices().first().map(|p| Plane::new(*p, normal))
}
