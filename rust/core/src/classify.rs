// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface type and outside boundary condition.
//!
//! Both are derived from already-resolved graph fields on demand; neither is
//! stored on the boundary.

use crate::graph::BoundaryGraph;
use crate::zones::ZoneNames;

/// Normals whose horizontal component exceeds this are walls
pub const HORIZONTAL_TOLERANCE: f64 = 1e-4;

/// Surface type of a building surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    Wall,
    Floor,
    Ceiling,
    Roof,
}

impl SurfaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceType::Wall => "Wall",
            SurfaceType::Floor => "Floor",
            SurfaceType::Ceiling => "Ceiling",
            SurfaceType::Roof => "Roof",
        }
    }
}

/// Outside boundary condition of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    Ground,
    Outdoors,
    /// Paired with the opposite boundary (index into the graph)
    Surface { opposite: usize },
    Adiabatic,
}

impl BoundaryCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryCondition::Ground => "Ground",
            BoundaryCondition::Outdoors => "Outdoors",
            BoundaryCondition::Surface { .. } => "Surface",
            BoundaryCondition::Adiabatic => "Adiabatic",
        }
    }

    #[inline]
    pub fn is_outdoors(&self) -> bool {
        matches!(self, BoundaryCondition::Outdoors)
    }
}

/// Classify a boundary by the direction of its outward normal
pub fn surface_type(graph: &BoundaryGraph, index: usize) -> SurfaceType {
    let n = graph.boundary(index).normal;
    let len = n.norm();
    let horizontal = if len > 0.0 {
        (n.x * n.x + n.y * n.y).sqrt() / len
    } else {
        0.0
    };

    if horizontal > HORIZONTAL_TOLERANCE {
        SurfaceType::Wall
    } else if n.z < 0.0 {
        SurfaceType::Floor
    } else if graph.is_external_facing(index) {
        SurfaceType::Roof
    } else {
        SurfaceType::Ceiling
    }
}

/// Outside boundary condition, in priority order:
/// ground, outdoors, paired surface in another zone, adiabatic.
pub fn boundary_condition(graph: &BoundaryGraph, index: usize, zones: &ZoneNames) -> BoundaryCondition {
    if graph.boundary(index).connected_to_ground {
        return BoundaryCondition::Ground;
    }

    let Some(opposite) = graph.links(index).opposite else {
        return BoundaryCondition::Adiabatic;
    };

    if graph.boundary(opposite).is_exterior {
        return BoundaryCondition::Outdoors;
    }

    let own_zone = zone_of(graph, index, zones);
    let other_zone = zone_of(graph, opposite, zones);
    match (own_zone, other_zone) {
        (Some(own), Some(other)) if own != other => BoundaryCondition::Surface { opposite },
        _ => BoundaryCondition::Adiabatic,
    }
}

/// Zone name of the space a boundary bounds
pub fn zone_of<'a>(graph: &BoundaryGraph, index: usize, zones: &'a ZoneNames) -> Option<&'a str> {
    graph.space(index).and_then(|s| zones.zone_of(&s.id))
}
