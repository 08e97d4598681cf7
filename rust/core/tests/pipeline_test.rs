// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end conversion of a two-room model.
//!
//! Room A (x 0..5) and room B (x 5..10) share the wall at x = 5. Room A has
//! an exterior south wall with a window, a roof and a ground floor. A canopy
//! floats 0.2 m in front of the south wall; a fin floats 4 m away.

use approx::assert_relative_eq;
use zonekit_core::{
    EngineDocument, EventLog, IdfModel, MaterialLibrary, Pipeline, RunStatus, Severity,
    SimulationSettings, SpaceBoundary,
};
use zonekit_geometry::Polyloop;

const MODEL: &str = r#"{
    "elements": [
        { "id": "wall-1", "kind": "wall", "material_ref": "brick" },
        { "id": "win-1", "kind": "window", "material_ref": "glass" }
    ],
    "spaces": [
        { "id": "s-a", "long_name": "Office", "short_name": "101" },
        { "id": "s-b", "long_name": "Office", "short_name": "102" }
    ],
    "boundaries": [
        {
            "id": "a-floor", "space_id": "s-a", "connected_to_ground": true,
            "vertices": [[0,0,0],[0,4,0],[5,4,0],[5,0,0]], "normal": [0,0,-1],
            "layers": [{ "material_ref": "concrete", "thickness": 0.2 }]
        },
        {
            "id": "a-south", "space_id": "s-a", "opposite_id": "x-a-south", "element_id": "wall-1",
            "vertices": [[0,0,0],[5,0,0],[5,0,3],[0,0,3]], "normal": [0,-1,0],
            "layers": [
                { "material_ref": "brick", "thickness": 0.2 },
                { "material_ref": "insulation", "thickness": 0.1 }
            ]
        },
        {
            "id": "x-a-south", "opposite_id": "a-south", "is_exterior": true,
            "vertices": [[0,0,3],[5,0,3],[5,0,0],[0,0,0]], "normal": [0,1,0]
        },
        {
            "id": "a-east", "space_id": "s-a", "opposite_id": "b-west",
            "vertices": [[5,0,0],[5,4,0],[5,4,3],[5,0,3]], "normal": [1,0,0],
            "layers": [
                { "material_ref": "gypsum", "thickness": 0.0125 },
                { "material_ref": "gypsum", "thickness": 0.0125 }
            ]
        },
        {
            "id": "b-west", "space_id": "s-b", "opposite_id": "a-east",
            "vertices": [[5,0,3],[5,4,3],[5,4,0],[5,0,0]], "normal": [-1,0,0],
            "layers": [
                { "material_ref": "gypsum", "thickness": 0.0125 },
                { "material_ref": "gypsum", "thickness": 0.0125 }
            ]
        },
        {
            "id": "a-window", "space_id": "s-a", "element_id": "win-1", "containing_id": "a-south",
            "vertices": [[1,0,1],[2,0,1],[2,0,2],[1,0,2]], "normal": [0,-1,0],
            "layers": [{ "material_ref": "glass", "thickness": 0.006 }]
        },
        {
            "id": "a-roof", "space_id": "s-a", "opposite_id": "x-a-roof",
            "vertices": [[0,0,3],[5,0,3],[5,4,3],[0,4,3]], "normal": [0,0,1],
            "layers": [{ "material_ref": "concrete", "thickness": 0.2 }]
        },
        {
            "id": "x-a-roof", "opposite_id": "a-roof", "is_exterior": true,
            "vertices": [[0,4,3],[5,4,3],[5,0,3],[0,0,3]], "normal": [0,0,-1]
        },
        {
            "id": "b-floor", "space_id": "s-b", "connected_to_ground": true,
            "vertices": [[5,0,0],[5,4,0],[10,4,0],[10,0,0]], "normal": [0,0,-1],
            "layers": [{ "material_ref": "concrete", "thickness": 0.2 }]
        },
        {
            "id": "b-sliver", "space_id": "s-b",
            "vertices": [[6,0,0],[6.001,0,0],[6.001,0,0.001]], "normal": [0,-1,0],
            "layers": [{ "material_ref": "concrete", "thickness": 0.2 }]
        }
    ],
    "shading": [
        {
            "name": "Canopy",
            "geometry": {
                "kind": "extrusion",
                "base": { "outer": [[1,-1,2.5],[4,-1,2.5],[4,-0.2,2.5],[1,-0.2,2.5]] },
                "direction": [0,0,1],
                "depth": 0.1
            }
        },
        {
            "name": "Far fin",
            "geometry": {
                "kind": "extrusion",
                "base": { "outer": [[1,-5,0],[1.2,-5,0],[1.2,-4,0],[1,-4,0]] },
                "direction": [0,0,1],
                "depth": 3
            }
        }
    ]
}"#;

const LIBRARY: &str = r#"{
    "concrete":   { "name": "Concrete",   "type": "opaque", "conductivity": 1.7,  "density": 2300, "specific_heat": 900 },
    "brick":      { "name": "Brick",      "type": "opaque", "conductivity": 0.8,  "density": 1900, "specific_heat": 840 },
    "insulation": { "name": "Insulation", "type": "opaque", "conductivity": 0.04, "density": 30,   "specific_heat": 1400 },
    "gypsum":     { "name": "Gypsum",     "type": "opaque", "conductivity": 0.25, "density": 900,  "specific_heat": 1000 },
    "glass":      { "name": "Glass",      "type": "glazing", "u_factor": 1.1, "solar_heat_gain": 0.5, "visible_transmittance": 0.7 }
}"#;

fn pipeline() -> Pipeline {
    let library = MaterialLibrary::from_json(LIBRARY).unwrap();
    Pipeline::new(library, SimulationSettings::default())
}

fn convert(document: EngineDocument) -> (IdfModel, RunStatus, EventLog) {
    let log = EventLog::new();
    let outcome = pipeline().run_reporting(document, &log);
    let model = outcome.model.expect("conversion should produce a model");
    (model, outcome.status, log)
}

/// Model with the unanchorable fin removed, so only the edit under test warns
fn canopy_only() -> EngineDocument {
    let mut document = EngineDocument::from_json(MODEL).unwrap();
    document.shading.retain(|s| s.name == "Canopy");
    document
}

fn boundary_mut<'a>(document: &'a mut EngineDocument, id: &str) -> &'a mut SpaceBoundary {
    document
        .boundaries
        .iter_mut()
        .find(|b| b.id == id)
        .unwrap_or_else(|| panic!("missing boundary {id}"))
}

fn field<'a>(model: &'a IdfModel, class: &str, name: &str, index: usize) -> &'a str {
    model
        .find(class, name)
        .unwrap_or_else(|| panic!("missing {class} {name}"))
        .value(index)
        .unwrap_or_default()
}

#[test]
fn zones_are_named_from_space_names() {
    let (model, _, _) = convert(EngineDocument::from_json(MODEL).unwrap());

    let zones: Vec<&str> = model.objects_of("Zone").filter_map(|z| z.name()).collect();
    assert_eq!(zones, vec!["Office 101", "Office 102"]);
    assert_eq!(field(&model, "BuildingSurface:Detailed", "a-floor", 3), "Office 101");
    assert_eq!(field(&model, "BuildingSurface:Detailed", "b-floor", 3), "Office 102");
}

#[test]
fn surfaces_are_classified() {
    let (model, _, _) = convert(EngineDocument::from_json(MODEL).unwrap());
    let surface = "BuildingSurface:Detailed";

    assert_eq!(field(&model, surface, "a-floor", 1), "Floor");
    assert_eq!(field(&model, surface, "a-floor", 5), "Ground");

    assert_eq!(field(&model, surface, "a-south", 1), "Wall");
    assert_eq!(field(&model, surface, "a-south", 5), "Outdoors");
    assert_eq!(field(&model, surface, "a-south", 7), "SunExposed");

    assert_eq!(field(&model, surface, "a-roof", 1), "Roof");
    assert_eq!(field(&model, surface, "a-roof", 5), "Outdoors");

    assert_eq!(field(&model, surface, "a-east", 5), "Surface");
    assert_eq!(field(&model, surface, "a-east", 6), "b-west");
    assert_eq!(field(&model, surface, "b-west", 6), "a-east");

    // Exterior counterparts and the sliver are not emitted
    assert!(model.find(surface, "x-a-south").is_none());
    assert!(model.find(surface, "b-sliver").is_none());
    assert_eq!(model.surfaces.len(), 6);
}

#[test]
fn constructions_are_shared() {
    let (model, _, _) = convert(EngineDocument::from_json(MODEL).unwrap());
    let surface = "BuildingSurface:Detailed";

    assert_eq!(field(&model, surface, "a-floor", 2), "Concrete 0.2000");
    assert_eq!(field(&model, surface, "b-floor", 2), "Concrete 0.2000");
    assert_eq!(
        field(&model, surface, "a-south", 2),
        "Brick 0.2000 + Insulation 0.1000"
    );
    assert_eq!(
        field(&model, surface, "a-east", 2),
        field(&model, surface, "b-west", 2)
    );

    assert_eq!(model.objects_of("Construction").count(), 4);
    assert_eq!(model.objects_of("Material").count(), 4);
    assert_eq!(model.objects_of("WindowMaterial:SimpleGlazingSystem").count(), 1);
}

#[test]
fn window_is_hosted_by_its_wall() {
    let (model, _, _) = convert(EngineDocument::from_json(MODEL).unwrap());
    let window = model
        .find("FenestrationSurface:Detailed", "a-window")
        .expect("window emitted");

    assert_eq!(window.value(1), Some("Window"));
    assert_eq!(window.value(2), Some("Glass 0.0060"));
    assert_eq!(window.value(3), Some("a-south"));
    assert_eq!(window.value(8), Some("4"));
}

#[test]
fn unanchorable_shading_still_writes_output() {
    let (model, status, log) = convert(EngineDocument::from_json(MODEL).unwrap());

    let names: Vec<&str> = model
        .objects_of("Shading:Building:Detailed")
        .filter_map(|s| s.name())
        .collect();
    assert_eq!(names.len(), 5);
    assert!(names.iter().all(|n| n.starts_with("Canopy ")));

    assert_eq!(status, RunStatus::Warnings);
    let warnings = log.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("Far fin"));
}

#[test]
fn clean_model_finishes_ok() {
    let mut document = EngineDocument::from_json(MODEL).unwrap();
    document.shading.retain(|s| s.name == "Canopy");

    let (_, status, log) = convert(document);
    assert_eq!(status, RunStatus::Ok);
    assert!(log.warnings().is_empty());
}

#[test]
fn records_follow_emission_order() {
    let (model, _, _) = convert(EngineDocument::from_json(MODEL).unwrap());

    let rank = |class: &str| match class {
        "Version" | "SimulationControl" | "Timestep" | "GlobalGeometryRules" => 0,
        "Site:Location" => 1,
        "Building" => 2,
        "RunPeriod" => 3,
        "Zone" => 4,
        "BuildingSurface:Detailed" => 5,
        "FenestrationSurface:Detailed" => 6,
        "Shading:Building:Detailed" => 7,
        "Construction" | "Construction:AirBoundary" => 8,
        _ => 9,
    };
    let ranks: Vec<u8> = model.objects().map(|o| rank(o.class())).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));

    let text = model.to_idf_string();
    assert!(text.starts_with("Version,"));
    assert!(text.find("Zone,").unwrap() < text.find("BuildingSurface:Detailed,").unwrap());
}

#[test]
fn unmapped_materials_get_placeholders() {
    let document = EngineDocument::from_json(MODEL).unwrap();
    let log = EventLog::new();
    let outcome = Pipeline::default().run_reporting(document, &log);
    let model = outcome.model.unwrap();

    assert_eq!(
        field(&model, "BuildingSurface:Detailed", "a-floor", 2),
        "UNMAPPED concrete 0.2000"
    );
    // One warning per distinct reference plus the far fin
    let unmapped = log
        .warnings()
        .into_iter()
        .filter(|w| w.message.contains("not in the library"))
        .count();
    assert_eq!(unmapped, 5);
}

#[test]
fn dangling_reference_aborts_without_output() {
    let json = MODEL.replace(r#""opposite_id": "b-west""#, r#""opposite_id": "missing""#);
    let log = EventLog::new();
    let outcome = pipeline().run_reporting(EngineDocument::from_json(&json).unwrap(), &log);

    assert!(outcome.model.is_none());
    assert_eq!(outcome.status, RunStatus::Errors);

    let errors: Vec<_> = log
        .events()
        .into_iter()
        .filter(|e| e.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("missing"));
}

#[test]
fn shading_sources_sharing_a_name_get_distinct_names() {
    let mut document = canopy_only();
    let canopy = document.shading[0].clone();
    document.shading.push(canopy);

    let (model, status, _) = convert(document);
    assert_eq!(status, RunStatus::Ok);

    let names: Vec<&str> = model
        .objects_of("Shading:Building:Detailed")
        .filter_map(|s| s.name())
        .collect();
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "Canopy 1");
    assert_eq!(names[5], "Canopy_1 1");

    let mut lowered: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
    lowered.sort();
    lowered.dedup();
    assert_eq!(lowered.len(), 10);
}

#[test]
fn shading_names_avoid_surface_names() {
    let mut document = canopy_only();
    boundary_mut(&mut document, "a-floor").id = "canopy 1".to_string();

    let (model, _, _) = convert(document);
    assert!(model.find("BuildingSurface:Detailed", "canopy 1").is_some());
    assert!(model.find("Shading:Building:Detailed", "Canopy 1").is_none());
    assert!(model.find("Shading:Building:Detailed", "Canopy 1_1").is_some());
}

#[test]
fn virtual_boundaries_without_layers_become_air_boundaries() {
    let mut document = canopy_only();
    for id in ["a-east", "b-west"] {
        let boundary = boundary_mut(&mut document, id);
        boundary.is_virtual = true;
        boundary.layers.clear();
    }

    let (model, status, _) = convert(document);
    assert_eq!(status, RunStatus::Ok);

    let surface = "BuildingSurface:Detailed";
    assert_eq!(field(&model, surface, "a-east", 2), "Air Boundary");
    assert_eq!(field(&model, surface, "b-west", 2), "Air Boundary");
    assert_eq!(field(&model, surface, "a-east", 5), "Surface");

    let air = model
        .find("Construction:AirBoundary", "Air Boundary")
        .expect("air boundary construction emitted");
    assert_eq!(air.value(1), Some("None"));
    assert_eq!(model.objects_of("Construction:AirBoundary").count(), 1);
}

#[test]
fn solid_boundary_without_layers_gets_placeholder() {
    let mut document = canopy_only();
    boundary_mut(&mut document, "a-roof").layers.clear();

    let (model, status, log) = convert(document);
    assert_eq!(status, RunStatus::Warnings);
    assert_eq!(field(&model, "BuildingSurface:Detailed", "a-roof", 2), "UNMAPPED");
    assert!(model.find("Construction", "UNMAPPED").is_some());

    let warnings = log.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("a-roof"));
    assert!(warnings[0].message.contains("placeholder construction"));
}

#[test]
fn omitted_partner_turns_surface_adiabatic() {
    let mut document = canopy_only();
    boundary_mut(&mut document, "b-west").geometry =
        Polyloop::from_coords(&[[5.0, 0.0, 0.0], [5.0, 0.001, 0.0], [5.0, 0.001, 0.001]]);

    let log = EventLog::new();
    let outcome = pipeline().run_reporting(document, &log);
    let model = outcome.model.unwrap();

    let surface = "BuildingSurface:Detailed";
    assert!(model.find(surface, "b-west").is_none());
    assert_eq!(field(&model, surface, "a-east", 5), "Adiabatic");
    assert_eq!(field(&model, surface, "a-east", 6), "");
    assert_eq!(outcome.summary.unwrap().omitted_surfaces, 2);
}

#[test]
fn fenestration_without_emitted_host_is_dropped() {
    let mut document = canopy_only();
    boundary_mut(&mut document, "a-window").containing_id = Some("x-a-south".to_string());

    let (model, status, log) = convert(document);
    assert_eq!(status, RunStatus::Warnings);
    assert!(model.find("FenestrationSurface:Detailed", "a-window").is_none());
    assert_eq!(model.fenestration.len(), 0);

    let warnings = log.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("a-window"));
    assert!(warnings[0].message.contains("dropped"));
}

#[test]
fn window_vertices_are_inset() {
    let (model, _, _) = convert(canopy_only());
    let window = model
        .find("FenestrationSurface:Detailed", "a-window")
        .expect("window emitted");
    let inset = SimulationSettings::default().fenestration_inset;

    let coords: Vec<f64> = (9..21)
        .map(|i| window.value(i).unwrap().parse().unwrap())
        .collect();
    let half_diagonal = 0.5_f64.sqrt();
    for vertex in coords.chunks(3) {
        let (x, y, z) = (vertex[0], vertex[1], vertex[2]);
        assert_eq!(y, 0.0);
        assert!(x > 1.0 && x < 2.0, "x = {x} not inside the opening");
        assert!(z > 1.0 && z < 2.0, "z = {z} not inside the opening");

        let distance = ((x - 1.5).powi(2) + (z - 1.5).powi(2)).sqrt();
        assert_relative_eq!(distance, half_diagonal - inset, epsilon = 1e-5);
    }
}
