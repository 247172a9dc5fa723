//! Core types shared across fleetpol facilities
//!
//! This crate provides foundational types used by the policy kernel and
//! its logging facility:
//!
//! - **Resource identity**: ResourceId, the opaque key policies attach to
//! - **Schema constants**: Canonical field keys and event names

pub mod resource;
pub mod schema;

pub use resource::ResourceId;
