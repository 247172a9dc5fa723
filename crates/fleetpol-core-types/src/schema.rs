//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.
//! `tracing` takes field names as identifiers at the call site, so each key
//! here must match the name the logging macros and call sites spell out.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Collection sizes
pub const FIELD_RESOURCE_COUNT: &str = "resource_count";
pub const FIELD_UPDATE_COUNT: &str = "update_count";
pub const FIELD_POLICY_COUNT: &str = "policy_count";

// Decode shape markers
pub const FIELD_SHAPE: &str = "shape";
pub const SHAPE_LEGACY: &str = "array";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
