//! fleetpol Core - immutable per-resource policy model
//!
//! This crate provides the data model a deployment-automation control plane
//! uses to track operational policy on the resources it manages, including:
//! - Policy tokens with boolean/tag/annotation classification
//! - Copy-on-write policy Sets with legacy-compatible JSON decoding
//! - Fleet-wide ResourceMaps with set algebra helpers
//! - Update records describing pending policy changes
//!
//! Persistence, transport and applying policy to live infrastructure are
//! left to collaborators.

pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, PolicyError, Result};
pub use fleetpol_core_types::{schema, ResourceId};
pub use model::policy::{boolean, get_tag_pattern, tag, tag_prefix};
pub use model::{Policy, PolicyKind, ResourceMap, Set, Update, Updates};

// Paths the logging macros expand to
#[doc(hidden)]
pub mod __private {
    pub use fleetpol_core_types::schema;
    pub use tracing;
}
