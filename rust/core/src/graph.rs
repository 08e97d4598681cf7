// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Space-boundary relationship graph.
//!
//! The [`BoundaryGraph`] owns every boundary, space and element of one
//! building load. Relationships (opposite boundary, containing boundary,
//! bounded space, source element) are resolved from identifier strings into
//! indices by four independent linking passes over identifier tables built
//! once. Records never point at each other directly, so the collections stay
//! trivially relocatable and serializable.
//!
//! A dangling identifier means the detection engine produced an inconsistent
//! graph; building fails with [`Error::UnresolvedReference`].

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::model::{ElementInfo, SpaceBoundary, SpaceInfo};

/// Kind of cross-reference held by a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Opposite,
    Containing,
    Space,
    Element,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Opposite => "opposite boundary",
            Relation::Containing => "containing boundary",
            Relation::Space => "bounded space",
            Relation::Element => "source element",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topological role of a boundary, derived from its relationships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// Exterior-facing, or paired with a boundary of another space
    Paired = 2,
    /// No opposite boundary
    Unpaired = 3,
    /// Opposite boundary bounds the same space
    SameSpace = 4,
}

impl Level {
    #[inline]
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Resolved cross-references of one boundary (indices into the graph)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryLinks {
    pub opposite: Option<usize>,
    pub containing: Option<usize>,
    pub space: Option<usize>,
    pub element: Option<usize>,
}

/// Resolved space-boundary graph for one building load
#[derive(Debug)]
pub struct BoundaryGraph {
    boundaries: Vec<SpaceBoundary>,
    spaces: Vec<SpaceInfo>,
    elements: Vec<ElementInfo>,
    links: Vec<BoundaryLinks>,
}

impl BoundaryGraph {
    /// Take ownership of the collections and resolve every cross-reference.
    pub fn build(
        elements: Vec<ElementInfo>,
        spaces: Vec<SpaceInfo>,
        boundaries: Vec<SpaceBoundary>,
    ) -> Result<Self> {
        let boundary_index = index_by_id("boundary", boundaries.iter().map(|b| b.id.as_str()))?;
        let space_index = index_by_id("space", spaces.iter().map(|s| s.id.as_str()))?;
        let element_index = index_by_id("element", elements.iter().map(|e| e.id.as_str()))?;

        let opposite = link_pass(&boundaries, &boundary_index, Relation::Opposite, |b| {
            b.opposite_id.as_deref()
        })?;
        let containing = link_pass(&boundaries, &boundary_index, Relation::Containing, |b| {
            b.containing_id.as_deref()
        })?;
        let space = link_pass(&boundaries, &space_index, Relation::Space, |b| {
            b.space_id.as_deref()
        })?;
        let element = link_pass(&boundaries, &element_index, Relation::Element, |b| {
            if b.is_virtual {
                None
            } else {
                b.element_id.as_deref()
            }
        })?;

        let links = (0..boundaries.len())
            .map(|i| BoundaryLinks {
                opposite: opposite[i],
                containing: containing[i],
                space: space[i],
                element: element[i],
            })
            .collect();

        tracing::debug!(
            boundaries = boundaries.len(),
            spaces = spaces.len(),
            elements = elements.len(),
            "Resolved boundary graph"
        );

        Ok(Self {
            boundaries,
            spaces,
            elements,
            links,
        })
    }

    // --- Collections ---

    pub fn boundaries(&self) -> &[SpaceBoundary] {
        &self.boundaries
    }

    pub fn spaces(&self) -> &[SpaceInfo] {
        &self.spaces
    }

    pub fn elements(&self) -> &[ElementInfo] {
        &self.elements
    }

    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    // --- Lookups ---

    pub fn boundary(&self, index: usize) -> &SpaceBoundary {
        &self.boundaries[index]
    }

    pub fn links(&self, index: usize) -> BoundaryLinks {
        self.links[index]
    }

    pub fn opposite(&self, index: usize) -> Option<&SpaceBoundary> {
        self.links[index].opposite.map(|i| &self.boundaries[i])
    }

    pub fn containing(&self, index: usize) -> Option<&SpaceBoundary> {
        self.links[index].containing.map(|i| &self.boundaries[i])
    }

    pub fn space(&self, index: usize) -> Option<&SpaceInfo> {
        self.links[index].space.map(|i| &self.spaces[i])
    }

    pub fn element(&self, index: usize) -> Option<&ElementInfo> {
        self.links[index].element.map(|i| &self.elements[i])
    }

    // --- Derived facts ---

    /// The boundary itself or its opposite lies on the building exterior
    pub fn is_external_facing(&self, index: usize) -> bool {
        self.boundaries[index].is_exterior
            || self.opposite(index).is_some_and(|o| o.is_exterior)
    }

    /// Classification level (2, 3 or 4)
    pub fn level(&self, index: usize) -> Level {
        if self.is_external_facing(index) {
            return Level::Paired;
        }

        let links = self.links[index];
        match links.opposite {
            None => Level::Unpaired,
            Some(o) if links.space.is_some() && self.links[o].space == links.space => {
                Level::SameSpace
            }
            Some(_) => Level::Paired,
        }
    }

    /// Spaces bounded by at least one boundary, sorted by identifier
    pub fn referenced_spaces(&self) -> Vec<&SpaceInfo> {
        let mut used = vec![false; self.spaces.len()];
        for links in &self.links {
            if let Some(s) = links.space {
                used[s] = true;
            }
        }

        let mut spaces: Vec<&SpaceInfo> = self
            .spaces
            .iter()
            .zip(used)
            .filter_map(|(s, u)| u.then_some(s))
            .collect();
        spaces.sort_by(|a, b| a.id.cmp(&b.id));
        spaces
    }
}

/// Build an `id -> index` table, rejecting duplicates
fn index_by_id<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<FxHashMap<String, usize>> {
    let mut index = FxHashMap::default();
    for (i, id) in ids.enumerate() {
        if index.insert(id.to_string(), i).is_some() {
            return Err(Error::DuplicateIdentifier {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(index)
}

/// Resolve one foreign-key column through its table
fn link_pass<F>(
    boundaries: &[SpaceBoundary],
    table: &FxHashMap<String, usize>,
    relation: Relation,
    key: F,
) -> Result<Vec<Option<usize>>>
where
    F: Fn(&SpaceBoundary) -> Option<&str>,
{
    boundaries
        .iter()
        .map(|b| match key(b) {
            None => Ok(None),
            Some(target) => table.get(target).copied().map(Some).ok_or_else(|| {
                Error::UnresolvedReference {
                    relation,
                    boundary: b.id.clone(),
                    target: target.to_string(),
                }
            }),
        })
        .collect()
}
