// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction and material deduplication.
//!
//! A layer is identified by its display name (library name plus thickness at
//! fixed precision). A construction is identified by the ordered sequence of
//! its layer names; order matters because constructions are directional
//! (outermost layer first).
//!
//! [`ConstructionSet`] is an explicit accumulator: [`ConstructionSet::resolve`]
//! consumes the set and hands it back together with the resolved record, so
//! a pipeline stage folds over its boundaries without shared mutable state.

use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use zonekit_geometry::THICKNESS_DIGITS;

use crate::error::{Error, Result};
use crate::materials::{MaterialLibrary, MaterialProperties};
use crate::model::MaterialLayer;

/// Name of the sentinel construction used when no layers are known
pub const UNMAPPED_CONSTRUCTION: &str = "UNMAPPED";

/// Name prefix of layers whose material reference has no library entry
pub const UNMAPPED_MATERIAL_PREFIX: &str = "UNMAPPED";

/// Maximum object name length accepted by EnergyPlus
const MAX_NAME_LEN: usize = 100;

/// A deduplicated material layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayer {
    pub name: String,
    pub thickness: f64,
    pub properties: MaterialProperties,
}

/// A deduplicated construction
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConstruction {
    pub name: String,
    /// Outermost layer first
    pub layers: Vec<Arc<OutputLayer>>,
}

impl OutputConstruction {
    /// Any layer is a glazing system
    pub fn is_glazed(&self) -> bool {
        self.layers.iter().any(|l| l.properties.is_glazing())
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }
}

/// Outcome of one construction request
pub type Resolved = Result<Arc<OutputConstruction>>;

/// Identity sets of every layer and construction seen so far
#[derive(Debug, Clone, Default)]
pub struct ConstructionSet {
    layers: FxHashMap<String, Arc<OutputLayer>>,
    constructions: FxHashMap<Vec<String>, Arc<OutputConstruction>>,
    layer_order: Vec<Arc<OutputLayer>>,
    construction_order: Vec<Arc<OutputConstruction>>,
    unmapped: BTreeSet<String>,
}

impl ConstructionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the construction for an ordered layer stack, creating and
    /// registering it on first request.
    pub fn resolve(mut self, layers: &[MaterialLayer], library: &MaterialLibrary) -> (Self, Resolved) {
        if layers.is_empty() {
            return (self, Err(Error::EmptyConstruction));
        }

        let resolved: Vec<Arc<OutputLayer>> = layers
            .iter()
            .map(|layer| self.layer_for(layer, library))
            .collect();

        let key: Vec<String> = resolved.iter().map(|l| l.name.clone()).collect();
        let construction = self.construction_for(key, resolved);
        (self, Ok(construction))
    }

    /// The sentinel construction substituted for empty layer stacks
    pub fn placeholder(mut self) -> (Self, Arc<OutputConstruction>) {
        let layer = self.intern_layer(OutputLayer {
            name: UNMAPPED_CONSTRUCTION.to_string(),
            thickness: 0.1,
            properties: MaterialProperties::placeholder(),
        });
        let key = vec![format!("{UNMAPPED_CONSTRUCTION} placeholder")];
        let construction = match self.constructions.get(&key) {
            Some(existing) => Arc::clone(existing),
            None => {
                let construction = Arc::new(OutputConstruction {
                    name: UNMAPPED_CONSTRUCTION.to_string(),
                    layers: vec![layer],
                });
                self.register(key, Arc::clone(&construction));
                construction
            }
        };
        (self, construction)
    }

    /// Constructions in creation order
    pub fn constructions(&self) -> &[Arc<OutputConstruction>] {
        &self.construction_order
    }

    /// Layers in creation order
    pub fn layers(&self) -> &[Arc<OutputLayer>] {
        &self.layer_order
    }

    /// Material references that had no library entry
    pub fn unmapped_references(&self) -> impl Iterator<Item = &str> {
        self.unmapped.iter().map(String::as_str)
    }

    fn layer_for(&mut self, layer: &MaterialLayer, library: &MaterialLibrary) -> Arc<OutputLayer> {
        let (base, properties) = match library.get(&layer.material_ref) {
            Some(material) => (material.name.clone(), material.properties.clone()),
            None => {
                if self.unmapped.insert(layer.material_ref.clone()) {
                    tracing::debug!(reference = %layer.material_ref, "Unmapped material reference");
                }
                (
                    format!("{UNMAPPED_MATERIAL_PREFIX} {}", layer.material_ref),
                    MaterialProperties::placeholder(),
                )
            }
        };

        self.intern_layer(OutputLayer {
            name: layer_name(&base, layer.thickness),
            thickness: layer.thickness,
            properties,
        })
    }

    fn intern_layer(&mut self, layer: OutputLayer) -> Arc<OutputLayer> {
        if let Some(existing) = self.layers.get(&layer.name) {
            return Arc::clone(existing);
        }
        let layer = Arc::new(layer);
        self.layers.insert(layer.name.clone(), Arc::clone(&layer));
        self.layer_order.push(Arc::clone(&layer));
        layer
    }

    fn construction_for(
        &mut self,
        key: Vec<String>,
        layers: Vec<Arc<OutputLayer>>,
    ) -> Arc<OutputConstruction> {
        if let Some(existing) = self.constructions.get(&key) {
            return Arc::clone(existing);
        }

        let joined = key.join(" + ");
        let name = if joined.len() <= MAX_NAME_LEN {
            joined
        } else {
            format!("Construction {}", self.construction_order.len() + 1)
        };

        let construction = Arc::new(OutputConstruction { name, layers });
        self.register(key, Arc::clone(&construction));
        construction
    }

    fn register(&mut self, key: Vec<String>, construction: Arc<OutputConstruction>) {
        self.constructions.insert(key, Arc::clone(&construction));
        self.construction_order.push(construction);
    }
}

/// Display name of a layer: library name plus thickness in metres
pub fn layer_name(base: &str, thickness: f64) -> String {
    format!("{} {:.*}", base, THICKNESS_DIGITS as usize, thickness)
}
