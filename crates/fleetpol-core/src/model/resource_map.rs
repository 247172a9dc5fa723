use std::collections::HashMap;

use fleetpol_core_types::ResourceId;
use serde::{Deserialize, Serialize};

use super::policy::Policy;
use super::set::Set;

/// Policy state across a fleet, indexed by resource
///
/// For queries a resource that is not listed behaves exactly like one listed
/// with an empty Set. Use [`ResourceMap::contains`] when the difference
/// matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceMap {
    resources: HashMap<ResourceId, Set>,
}

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// All listed resource ids, in no particular order
    pub fn to_vec(&self) -> Vec<ResourceId> {
        self.resources.keys().cloned().collect()
    }

    /// Direct membership test
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.resources.contains_key(id)
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Set> {
        self.resources.get(id)
    }

    /// Policies of a resource, empty when it is not listed
    pub fn policies_for(&self, id: &ResourceId) -> Set {
        self.resources.get(id).cloned().unwrap_or_default()
    }

    /// Copy of this map with `id` bound to `policies`
    pub fn with(&self, id: ResourceId, policies: Set) -> ResourceMap {
        let mut next = self.clone();
        next.resources.insert(id, policies);
        next
    }

    /// Entries whose key is not listed in `other`; values in `other` are ignored
    pub fn without(&self, other: &ResourceMap) -> ResourceMap {
        self.resources
            .iter()
            .filter(|(id, _)| !other.contains(id))
            .map(|(id, set)| (id.clone(), set.clone()))
            .collect()
    }

    /// Entries whose Set has `policy`, using boolean-aware membership
    pub fn only_with_policy(&self, policy: &Policy) -> ResourceMap {
        self.resources
            .iter()
            .filter(|(_, set)| set.has(policy))
            .map(|(id, set)| (id.clone(), set.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceId, &Set)> {
        self.resources.iter()
    }
}

impl FromIterator<(ResourceId, Set)> for ResourceMap {
    fn from_iter<I: IntoIterator<Item = (ResourceId, Set)>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<ResourceId, Set>> for ResourceMap {
    fn from(resources: HashMap<ResourceId, Set>) -> Self {
        Self { resources }
    }
}

impl From<ResourceMap> for HashMap<ResourceId, Set> {
    fn from(map: ResourceMap) -> Self {
        map.resources
    }
}

impl IntoIterator for ResourceMap {
    type Item = (ResourceId, Set);
    type IntoIter = std::collections::hash_map::IntoIter<ResourceId, Set>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}
