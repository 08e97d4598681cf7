// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed records and their conversion into [`IdfObject`]s.

use zonekit_geometry::Polyloop;

use super::record::{num, IdfObject};
use crate::classify::{BoundaryCondition, SurfaceType};
use crate::constructions::{OutputConstruction, OutputLayer};
use crate::materials::MaterialProperties;
use crate::settings::SimulationSettings;

/// Name of the construction assigned to virtual boundaries
pub const AIR_BOUNDARY_CONSTRUCTION: &str = "Air Boundary";

/// Fenestration surface type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenestrationType {
    Window,
    Door,
    GlassDoor,
}

impl FenestrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FenestrationType::Window => "Window",
            FenestrationType::Door => "Door",
            FenestrationType::GlassDoor => "GlassDoor",
        }
    }
}

/// `BuildingSurface:Detailed`
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    pub name: String,
    pub surface_type: SurfaceType,
    pub construction: String,
    pub zone: String,
    pub boundary_condition: BoundaryCondition,
    /// Name of the matching surface for `Surface` conditions
    pub outside_object: Option<String>,
    pub vertices: Polyloop,
}

/// `FenestrationSurface:Detailed`
#[derive(Debug, Clone, PartialEq)]
pub struct FenestrationRecord {
    pub name: String,
    pub fenestration_type: FenestrationType,
    pub construction: String,
    pub host: String,
    /// Matching fenestration in the adjacent zone
    pub outside_object: Option<String>,
    pub vertices: Polyloop,
}

/// `Shading:Building:Detailed`
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingRecord {
    pub name: String,
    pub vertices: Polyloop,
}

pub fn version(settings: &SimulationSettings) -> IdfObject {
    IdfObject::new("Version").field("Version Identifier", &settings.energyplus_version)
}

pub fn simulation_control() -> IdfObject {
    IdfObject::new("SimulationControl")
        .field("Do Zone Sizing Calculation", "No")
        .field("Do System Sizing Calculation", "No")
        .field("Do Plant Sizing Calculation", "No")
        .field("Run Simulation for Sizing Periods", "No")
        .field("Run Simulation for Weather File Run Periods", "Yes")
}

pub fn timestep(settings: &SimulationSettings) -> IdfObject {
    IdfObject::new("Timestep").field("Number of Timesteps per Hour", settings.timesteps_per_hour)
}

pub fn global_geometry_rules() -> IdfObject {
    IdfObject::new("GlobalGeometryRules")
        .field("Starting Vertex Position", "UpperLeftCorner")
        .field("Vertex Entry Direction", "Counterclockwise")
        .field("Coordinate System", "Relative")
}

pub fn site_location(settings: &SimulationSettings) -> IdfObject {
    let location = &settings.location;
    IdfObject::new("Site:Location")
        .field("Name", &location.name)
        .field("Latitude {deg}", num(location.latitude))
        .field("Longitude {deg}", num(location.longitude))
        .field("Time Zone {hr}", num(location.time_zone))
        .field("Elevation {m}", num(location.elevation))
}

pub fn building(settings: &SimulationSettings) -> IdfObject {
    IdfObject::new("Building")
        .field("Name", &settings.building_name)
        .field("North Axis {deg}", num(settings.north_axis))
        .field("Terrain", &settings.terrain)
        .field(
            "Loads Convergence Tolerance Value {W}",
            num(settings.loads_convergence_tolerance),
        )
        .field(
            "Temperature Convergence Tolerance Value {deltaC}",
            num(settings.temperature_convergence_tolerance),
        )
        .field("Solar Distribution", &settings.solar_distribution)
        .field("Maximum Number of Warmup Days", 25)
        .field("Minimum Number of Warmup Days", 6)
}

pub fn run_period(settings: &SimulationSettings) -> IdfObject {
    let period = &settings.run_period;
    IdfObject::new("RunPeriod")
        .field("Name", &period.name)
        .field("Begin Month", period.begin_month)
        .field("Begin Day of Month", period.begin_day)
        .field("Begin Year", "")
        .field("End Month", period.end_month)
        .field("End Day of Month", period.end_day)
}

pub fn zone(name: &str) -> IdfObject {
    IdfObject::new("Zone")
        .field("Name", name)
        .field("Direction of Relative North {deg}", 0)
        .field("X Origin {m}", 0)
        .field("Y Origin {m}", 0)
        .field("Z Origin {m}", 0)
        .field("Type", 1)
        .field("Multiplier", 1)
        .field("Ceiling Height {m}", "autocalculate")
        .field("Volume {m3}", "autocalculate")
}

impl SurfaceRecord {
    pub fn to_object(&self) -> IdfObject {
        let (sun, wind) = if self.boundary_condition.is_outdoors() {
            ("SunExposed", "WindExposed")
        } else {
            ("NoSun", "NoWind")
        };

        IdfObject::new("BuildingSurface:Detailed")
            .field("Name", &self.name)
            .field("Surface Type", self.surface_type.as_str())
            .field("Construction Name", &self.construction)
            .field("Zone Name", &self.zone)
            .field("Space Name", "")
            .field("Outside Boundary Condition", self.boundary_condition.as_str())
            .field(
                "Outside Boundary Condition Object",
                self.outside_object.as_deref().unwrap_or(""),
            )
            .field("Sun Exposure", sun)
            .field("Wind Exposure", wind)
            .field("View Factor to Ground", "autocalculate")
            .vertices(&self.vertices)
    }
}

impl FenestrationRecord {
    pub fn to_object(&self) -> IdfObject {
        IdfObject::new("FenestrationSurface:Detailed")
            .field("Name", &self.name)
            .field("Surface Type", self.fenestration_type.as_str())
            .field("Construction Name", &self.construction)
            .field("Building Surface Name", &self.host)
            .field(
                "Outside Boundary Condition Object",
                self.outside_object.as_deref().unwrap_or(""),
            )
            .field("View Factor to Ground", "autocalculate")
            .field("Frame and Divider Name", "")
            .field("Multiplier", 1)
            .vertices(&self.vertices)
    }
}

impl ShadingRecord {
    pub fn to_object(&self) -> IdfObject {
        IdfObject::new("Shading:Building:Detailed")
            .field("Name", &self.name)
            .field("Transmittance Schedule Name", "")
            .vertices(&self.vertices)
    }
}

pub fn construction(construction: &OutputConstruction) -> IdfObject {
    let mut object = IdfObject::new("Construction").field("Name", &construction.name);
    for (i, layer) in construction.layers.iter().enumerate() {
        let comment = if i == 0 {
            "Outside Layer".to_string()
        } else {
            format!("Layer {}", i + 1)
        };
        object = object.field(comment, &layer.name);
    }
    object
}

pub fn air_boundary() -> IdfObject {
    IdfObject::new("Construction:AirBoundary")
        .field("Name", AIR_BOUNDARY_CONSTRUCTION)
        .field("Air Exchange Method", "None")
}

pub fn material(layer: &OutputLayer) -> IdfObject {
    match &layer.properties {
        MaterialProperties::Opaque {
            roughness,
            conductivity,
            density,
            specific_heat,
            thermal_absorptance,
            solar_absorptance,
            visible_absorptance,
        } => IdfObject::new("Material")
            .field("Name", &layer.name)
            .field("Roughness", roughness.as_str())
            .field("Thickness {m}", num(layer.thickness))
            .field("Conductivity {W/m-K}", num(*conductivity))
            .field("Density {kg/m3}", num(*density))
            .field("Specific Heat {J/kg-K}", num(*specific_heat))
            .field("Thermal Absorptance", num(*thermal_absorptance))
            .field("Solar Absorptance", num(*solar_absorptance))
            .field("Visible Absorptance", num(*visible_absorptance)),
        MaterialProperties::Glazing {
            u_factor,
            solar_heat_gain,
            visible_transmittance,
        } => IdfObject::new("WindowMaterial:SimpleGlazingSystem")
            .field("Name", &layer.name)
            .field("U-Factor {W/m2-K}", num(*u_factor))
            .field("Solar Heat Gain Coefficient", num(*solar_heat_gain))
            .field("Visible Transmittance", num(*visible_transmittance)),
    }
}
