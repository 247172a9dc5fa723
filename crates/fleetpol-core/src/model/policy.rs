//! Policy tokens
//!
//! A policy is a short named token attached to a resource. A fixed handful
//! of tokens are boolean flags (`locked`, `automated`, `ignore`) whose
//! meaning is "on" only when the stored value is `"true"`. Tag policies are
//! built per container as `tag.<container>` and carry a filter pattern.
//! Every other token is a free-form annotation.

use std::borrow::Cow;

use fleetpol_core_types::ResourceId;
use serde::{Deserialize, Serialize};

use super::resource_map::ResourceMap;

const TAG_PREFIX: &str = "tag.";
const GLOB_PREFIX: &str = "glob:";
const WILDCARD_PATTERN: &str = "*";

/// Named policy token, e.g. `locked` or `tag.app`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Policy(Cow<'static, str>);

pub const IGNORE: Policy = Policy::from_static("ignore");
pub const LOCKED: Policy = Policy::from_static("locked");
pub const LOCKED_USER: Policy = Policy::from_static("locked_user");
pub const LOCKED_MSG: Policy = Policy::from_static("locked_msg");
pub const AUTOMATED: Policy = Policy::from_static("automated");
pub const TAG_ALL: Policy = Policy::from_static("tag_all");

/// The closed set of boolean policies
const BOOLEAN_POLICIES: [Policy; 3] = [LOCKED, AUTOMATED, IGNORE];

/// Classification of a policy token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// One of the fixed flags; "on" only when valued `"true"`
    Boolean,
    /// Per-container `tag.<container>` filter pattern
    Tag,
    /// Any other key/value annotation
    Annotation,
}

impl Policy {
    pub const fn from_static(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    pub fn new(token: impl Into<String>) -> Self {
        Self(Cow::Owned(token.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify this token
    ///
    /// Boolean membership is an exact match against the enumerated flags, so
    /// a new token never becomes boolean by accident.
    pub fn kind(&self) -> PolicyKind {
        if BOOLEAN_POLICIES.contains(self) {
            PolicyKind::Boolean
        } else if self.0.starts_with(TAG_PREFIX) {
            PolicyKind::Tag
        } else {
            PolicyKind::Annotation
        }
    }

    /// Container name of a tag policy, `None` for any other kind
    pub fn container(&self) -> Option<&str> {
        self.0.strip_prefix(TAG_PREFIX)
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Policy {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Policy {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl AsRef<str> for Policy {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// True iff `policy` is one of the fixed boolean flags
pub fn boolean(policy: &Policy) -> bool {
    policy.kind() == PolicyKind::Boolean
}

/// Build the tag policy for a container. Any name is accepted, including "".
pub fn tag_prefix(container: &str) -> Policy {
    Policy::new(format!("{TAG_PREFIX}{container}"))
}

/// True iff the token starts with `tag.`
pub fn tag(policy: &Policy) -> bool {
    policy.as_str().starts_with(TAG_PREFIX)
}

/// Tag filter pattern for a container on a resource
///
/// Falls back to `"*"` when there is no map, the resource is not listed, or
/// the tag policy is unset. A leading `glob:` is stripped; the pattern is
/// returned without being compiled or validated.
pub fn get_tag_pattern(
    resources: Option<&ResourceMap>,
    id: &ResourceId,
    container: &str,
) -> String {
    let Some(resources) = resources else {
        return WILDCARD_PATTERN.to_string();
    };
    match resources
        .get(id)
        .and_then(|policies| policies.get(&tag_prefix(container)))
    {
        Some(pattern) => pattern
            .strip_prefix(GLOB_PREFIX)
            .unwrap_or(pattern)
            .to_string(),
        None => WILDCARD_PATTERN.to_string(),
    }
}
