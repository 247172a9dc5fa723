//! Operation logging macros
//!
//! Every operation boundary is one event carrying the schema fields
//! `component`, `op` and `event`. Ends also carry `duration_ms`, measured
//! from the `Instant` passed as `started`; failures add `err.kind` and
//! `err.code`. The macros only reach through `$crate`, so callers need
//! neither `tracing` nor `fleetpol-core-types` in their own manifest.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use fleetpol_core::log_op_start;
/// log_op_start!("decode_set");
/// log_op_start!("apply_updates", update_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation started at `started`
///
/// # Example
///
/// ```
/// # use fleetpol_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("decode_set", started = started, policy_count = 1);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, started = $started:expr $(, $($field:tt)*)?) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            $($($field)*)?
        )
    };
}

/// Log a failed operation; `err` is borrowed and classified through `ExError`
///
/// # Example
///
/// ```
/// # use fleetpol_core::{log_op_error, PolicyError};
/// let started = std::time::Instant::now();
/// let err = PolicyError::MalformedInterchangeValue { message: "expected object".to_string() };
/// log_op_error!("decode_set", err, started = started);
/// assert!(err.to_string().contains("expected object"));
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, started = $started:expr $(, $($field:tt)*)?) => {{
        let ex_err = $crate::errors::ExError::from(::core::clone::Clone::clone(&$err));
        $crate::__private::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END_ERROR,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($($field)*)?
        );
    }};
}
