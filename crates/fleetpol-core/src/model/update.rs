//! Pending policy changes
//!
//! An `Update` describes what should change on one resource without
//! touching any stored Set. Collaborators compute Updates and later commit
//! them; applying one always produces a new Set.

use std::collections::HashMap;
use std::time::Instant;

use fleetpol_core_types::ResourceId;
use serde::{Deserialize, Serialize};

use super::resource_map::ResourceMap;
use super::set::Set;
use crate::{log_op_end, log_op_start};

/// Additions and removals for one resource
///
/// Only the keys of `remove` matter; its values are placeholders. Nothing
/// stops a key from appearing in both halves (see [`Update::apply`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub add: Set,
    #[serde(default)]
    pub remove: Set,
}

impl Update {
    pub fn new(add: Set, remove: Set) -> Self {
        Self { add, remove }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    /// Produce the Set that results from applying this update to `policies`
    ///
    /// Every key of `remove` is deleted first, then every pair of `add` is
    /// upserted. A key present in both ends up with the value from `add`.
    pub fn apply(&self, policies: &Set) -> Set {
        let removed = self
            .remove
            .policies()
            .fold(policies.clone(), |acc, p| acc.without(p));
        self.add
            .iter()
            .fold(removed, |acc, (p, v)| acc.set(p.clone(), v))
    }
}

/// Pending updates across a fleet, indexed by resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Updates {
    updates: HashMap<ResourceId, Update>,
}

impl Updates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Update> {
        self.updates.get(id)
    }

    /// Copy of these updates with `id` bound to `update`
    pub fn with(&self, id: ResourceId, update: Update) -> Updates {
        let mut next = self.clone();
        next.updates.insert(id, update);
        next
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceId, &Update)> {
        self.updates.iter()
    }

    /// Produce the ResourceMap that results from applying every update
    ///
    /// A resource with an update but no entry in `resources` starts from an
    /// empty Set. Resources without an update are carried over unchanged.
    pub fn apply(&self, resources: &ResourceMap) -> ResourceMap {
        let started = Instant::now();
        log_op_start!(
            "apply_updates",
            resource_count = resources.len(),
            update_count = self.len()
        );

        let mut next: HashMap<ResourceId, Set> = resources.clone().into();
        for (id, update) in &self.updates {
            let current = next.remove(id).unwrap_or_default();
            next.insert(id.clone(), update.apply(&current));
        }
        let next = ResourceMap::from(next);

        log_op_end!(
            "apply_updates",
            started = started,
            resource_count = next.len()
        );
        next
    }
}

impl FromIterator<(ResourceId, Update)> for Updates {
    fn from_iter<I: IntoIterator<Item = (ResourceId, Update)>>(iter: I) -> Self {
        Self {
            updates: iter.into_iter().collect(),
        }
    }
}
