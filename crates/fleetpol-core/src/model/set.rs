//! Policy sets
//!
//! A `Set` holds every policy attached to one resource. Sets are values:
//! each derivation (`add`, `set`, `without`) returns a fresh Set and leaves
//! the receiver untouched, so earlier Sets stay valid as snapshots and can
//! be shared freely between resources and threads.
//!
//! # Interchange
//!
//! The canonical JSON shape is an object of token to value:
//!
//! ```json
//! {"locked": "true", "locked_user": "ops", "tag.app": "glob:v*"}
//! ```
//!
//! Older documents stored a plain list of tokens. Decoding still accepts
//! that shape and treats each token as a boolean `add`; encoding only ever
//! emits the object shape.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use fleetpol_core_types::schema::SHAPE_LEGACY;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::policy::{Policy, PolicyKind};
use crate::errors::{PolicyError, Result};
use crate::{log_op_end, log_op_error, log_op_start};

const TRUE_VALUE: &str = "true";

/// Immutable mapping from policy token to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Set {
    policies: BTreeMap<Policy, String>,
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this Set with each policy bound to `"true"`
    ///
    /// Meant for boolean flags but legal for any token; the stored value is
    /// the text `"true"` either way.
    pub fn add(&self, policies: &[Policy]) -> Set {
        let mut next = self.clone();
        for policy in policies {
            next.policies.insert(policy.clone(), TRUE_VALUE.to_string());
        }
        next
    }

    /// Copy of this Set with `policy` bound to exactly `value`
    pub fn set(&self, policy: impl Into<Policy>, value: impl Into<String>) -> Set {
        let mut next = self.clone();
        next.policies.insert(policy.into(), value.into());
        next
    }

    /// Whether the resource has `policy`
    ///
    /// Boolean policies count only when valued `"true"`; any other policy
    /// counts as soon as its key is present.
    pub fn has(&self, policy: &Policy) -> bool {
        match self.policies.get(policy) {
            Some(value) if policy.kind() == PolicyKind::Boolean => value == TRUE_VALUE,
            Some(_) => true,
            None => false,
        }
    }

    /// Raw lookup, regardless of policy kind or value
    pub fn get(&self, policy: &Policy) -> Option<&str> {
        self.policies.get(policy).map(String::as_str)
    }

    /// Copy of this Set with `policy` removed
    pub fn without(&self, policy: &Policy) -> Set {
        let mut next = self.clone();
        next.policies.remove(policy);
        next
    }

    /// Plain string projection for label/annotation style consumers
    pub fn to_string_map(&self) -> HashMap<String, String> {
        self.policies
            .iter()
            .map(|(p, v)| (p.as_str().to_string(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Policy, &str)> {
        self.policies.iter().map(|(p, v)| (p, v.as_str()))
    }

    pub fn policies(&self) -> impl Iterator<Item = &Policy> {
        self.policies.keys()
    }

    /// Decode a Set from JSON, accepting the canonical and legacy shapes
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::MalformedInterchangeValue` if the input is
    /// neither an object of strings nor an array of strings.
    pub fn from_json(input: &str) -> Result<Set> {
        let started = Instant::now();
        log_op_start!("decode_set");

        match serde_json::from_str::<Set>(input) {
            Ok(set) => {
                log_op_end!("decode_set", started = started, policy_count = set.len());
                Ok(set)
            }
            Err(e) => {
                let err = PolicyError::MalformedInterchangeValue {
                    message: e.to_string(),
                };
                log_op_error!("decode_set", err, started = started);
                Err(err)
            }
        }
    }

    /// Encode this Set in the canonical object shape
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Serialization` if serde_json fails to encode.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PolicyError::Serialization {
            message: e.to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for Set {
    /// Object of token to value first, then the legacy token list
    ///
    /// A value matching neither reports both attempts' causes. `null` is
    /// the absent Set.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Set::new());
        }

        let object_err = match BTreeMap::<Policy, String>::deserialize(&value) {
            Ok(policies) => return Ok(Set { policies }),
            Err(e) => e,
        };
        match Vec::<Policy>::deserialize(&value) {
            Ok(list) => {
                tracing::debug!(
                    component = module_path!(),
                    shape = SHAPE_LEGACY,
                    policy_count = list.len(),
                    "accepted legacy policy list"
                );
                Ok(Set::new().add(&list))
            }
            Err(list_err) => Err(D::Error::custom(format!(
                "expected an object of policy values ({}) or a list of policies ({})",
                object_err, list_err
            ))),
        }
    }
}

impl std::fmt::Display for Set {
    /// Debug rendering `{k:v, k:v}`; not a serialization format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self
            .policies
            .iter()
            .map(|(p, v)| format!("{}:{}", p, v))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

impl FromIterator<(Policy, String)> for Set {
    fn from_iter<I: IntoIterator<Item = (Policy, String)>>(iter: I) -> Self {
        Self {
            policies: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = (&'a Policy, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, Policy, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.policies.iter()
    }
}
