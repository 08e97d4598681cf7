// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic zone naming.
//!
//! Spaces with an externally assigned zone name keep it (several spaces may
//! share one zone). Every other space gets the first candidate from a
//! prioritized list that is non-blank and not yet used, compared
//! case-insensitively. Spaces are visited in identifier order so earlier
//! identifiers win collisions and the output is reproducible.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::model::SpaceInfo;

/// A candidate-generating strategy
type Candidate = fn(&SpaceInfo) -> Option<String>;

/// Strategies tried in order before falling back to a counter
const CANDIDATES: [Candidate; 4] = [combined_name, long_name, short_name, identifier];

/// Zone name per space plus the distinct zones in first-use order
#[derive(Debug, Clone, Default)]
pub struct ZoneNames {
    by_space: BTreeMap<String, String>,
    zones: Vec<String>,
}

impl ZoneNames {
    /// Zone name assigned to a space
    pub fn zone_of(&self, space_id: &str) -> Option<&str> {
        self.by_space.get(space_id).map(String::as_str)
    }

    /// Distinct zone names, externally assigned ones first
    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Spellings that differ only in case join the zone first seen
    fn assign(&mut self, space_id: &str, name: String) {
        let existing = self
            .zones
            .iter()
            .find(|z| z.to_lowercase() == name.to_lowercase())
            .cloned();
        let name = match existing {
            Some(zone) => {
                if zone != name {
                    tracing::warn!(space = %space_id, zone = %zone, requested = %name, "Zone name differs only in case; merged");
                }
                zone
            }
            None => {
                self.zones.push(name.clone());
                name
            }
        };
        self.by_space.insert(space_id.to_string(), name);
    }
}

/// Case-insensitive registry of object names already written
#[derive(Debug, Clone, Default)]
pub(crate) struct UniqueNames {
    used: FxHashSet<String>,
}

impl UniqueNames {
    /// Claim `base`, or the first free `{base}_{counter}`
    pub(crate) fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_lowercase()) {
            return base.to_string();
        }
        (1..)
            .map(|counter| format!("{base}_{counter}"))
            .find(|name| self.used.insert(name.to_lowercase()))
            .unwrap_or_else(|| base.to_string())
    }
}

/// Assign zone names to the given (referenced) spaces
pub fn resolve_zone_names<'a, I>(spaces: I) -> ZoneNames
where
    I: IntoIterator<Item = &'a SpaceInfo>,
{
    let mut ordered: Vec<&SpaceInfo> = spaces.into_iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut names = ZoneNames::default();
    let mut used: FxHashSet<String> = FxHashSet::default();

    let (assigned, unassigned): (Vec<&SpaceInfo>, Vec<&SpaceInfo>) = ordered
        .into_iter()
        .partition(|s| s.zone_name.as_deref().and_then(sanitize).is_some());

    for space in assigned {
        if let Some(name) = space.zone_name.as_deref().and_then(sanitize) {
            used.insert(name.to_lowercase());
            names.assign(&space.id, name);
        }
    }

    for space in unassigned {
        let name = pick_name(space, &used);
        used.insert(name.to_lowercase());
        tracing::trace!(space = %space.id, zone = %name, "Named zone");
        names.assign(&space.id, name);
    }

    names
}

fn pick_name(space: &SpaceInfo, used: &FxHashSet<String>) -> String {
    let is_free = |name: &str| !used.contains(&name.to_lowercase());

    for candidate in CANDIDATES {
        if let Some(name) = candidate(space) {
            if is_free(&name) {
                return name;
            }
        }
    }

    let base = sanitize(&space.id).unwrap_or_else(|| "Zone".to_string());
    (1..)
        .map(|counter| format!("{base}_{counter}"))
        .find(|name| is_free(name))
        .unwrap_or(base)
}

fn combined_name(space: &SpaceInfo) -> Option<String> {
    let long = space.long_name.as_deref().and_then(sanitize)?;
    let short = space.short_name.as_deref().and_then(sanitize)?;
    Some(format!("{long} {short}"))
}

fn long_name(space: &SpaceInfo) -> Option<String> {
    space.long_name.as_deref().and_then(sanitize)
}

fn short_name(space: &SpaceInfo) -> Option<String> {
    space.short_name.as_deref().and_then(sanitize)
}

fn identifier(space: &SpaceInfo) -> Option<String> {
    sanitize(&space.id)
}

/// Trim and strip characters that terminate IDF fields; blank yields `None`
pub(crate) fn sanitize(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            ',' | ';' | '!' => '_',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
