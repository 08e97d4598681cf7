// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! EnergyPlus input data file (IDF) output.
//!
//! Records are collected per category and rendered in a fixed emission
//! order: preamble, location, building, run period, zones, surfaces,
//! fenestration, shading, constructions, materials.

pub mod objects;
pub mod record;
pub mod vertices;

use std::fmt::Write as _;
use std::path::Path;

pub use objects::{
    FenestrationRecord, FenestrationType, ShadingRecord, SurfaceRecord, AIR_BOUNDARY_CONSTRUCTION,
};
pub use record::{IdfField, IdfObject};
pub use vertices::{prepare_ring, MIN_EDGE_LENGTH};

use crate::constructions::ConstructionSet;
use crate::error::Result;
use crate::settings::SimulationSettings;

/// Complete output model, ready to render
#[derive(Debug, Clone, Default)]
pub struct IdfModel {
    pub preamble: Vec<IdfObject>,
    pub zones: Vec<IdfObject>,
    pub surfaces: Vec<IdfObject>,
    pub fenestration: Vec<IdfObject>,
    pub shading: Vec<IdfObject>,
    pub constructions: Vec<IdfObject>,
    pub materials: Vec<IdfObject>,
}

impl IdfModel {
    /// Model with the preamble, site and run period filled in
    pub fn with_settings(settings: &SimulationSettings) -> Self {
        Self {
            preamble: vec![
                objects::version(settings),
                objects::simulation_control(),
                objects::timestep(settings),
                objects::global_geometry_rules(),
                objects::site_location(settings),
                objects::building(settings),
                objects::run_period(settings),
            ],
            ..Self::default()
        }
    }

    pub fn push_zone(&mut self, name: &str) {
        self.zones.push(objects::zone(name));
    }

    pub fn push_surface(&mut self, record: &SurfaceRecord) {
        self.surfaces.push(record.to_object());
    }

    pub fn push_fenestration(&mut self, record: &FenestrationRecord) {
        self.fenestration.push(record.to_object());
    }

    pub fn push_shading(&mut self, record: &ShadingRecord) {
        self.shading.push(record.to_object());
    }

    /// Emit every construction and layer of the set, plus the air boundary
    /// construction when used
    pub fn push_constructions(&mut self, set: &ConstructionSet, air_boundary: bool) {
        self.constructions
            .extend(set.constructions().iter().map(|c| objects::construction(c)));
        if air_boundary {
            self.constructions.push(objects::air_boundary());
        }
        self.materials
            .extend(set.layers().iter().map(|l| objects::material(l)));
    }

    /// All objects in emission order
    pub fn objects(&self) -> impl Iterator<Item = &IdfObject> {
        self.preamble
            .iter()
            .chain(&self.zones)
            .chain(&self.surfaces)
            .chain(&self.fenestration)
            .chain(&self.shading)
            .chain(&self.constructions)
            .chain(&self.materials)
    }

    /// Objects of one class, in emission order
    pub fn objects_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a IdfObject> + 'a {
        self.objects().filter(move |o| o.class() == class)
    }

    /// Find a named object of a class
    pub fn find(&self, class: &str, name: &str) -> Option<&IdfObject> {
        self.objects()
            .find(|o| o.class() == class && o.name() == Some(name))
    }

    pub fn to_idf_string(&self) -> String {
        let mut out = String::new();
        for object in self.objects() {
            // Writing into a String cannot fail
            let _ = writeln!(out, "{object}");
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_idf_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_precedes_zones() {
        let mut model = IdfModel::with_settings(&SimulationSettings::default());
        model.push_zone("Office");

        let classes: Vec<&str> = model.objects().map(|o| o.class()).collect();
        assert_eq!(
            classes,
            vec![
                "Version",
                "SimulationControl",
                "Timestep",
                "GlobalGeometryRules",
                "Site:Location",
                "Building",
                "RunPeriod",
                "Zone",
            ]
        );

        let text = model.to_idf_string();
        assert!(text.starts_with("Version,\n"));
        assert!(text.contains("UpperLeftCorner,"));
        assert!(model.find("Zone", "Office").is_some());
    }
}
