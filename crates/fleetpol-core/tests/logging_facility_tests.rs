#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::time::Instant;

use common::{resource, sample_fleet};
use fleetpol_core::errors::{ExErrorKind, PolicyError};
use fleetpol_core::logging_facility::test_capture::init_test_capture;
use fleetpol_core::model::policy::LOCKED;
use fleetpol_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_POLICY_COUNT, FIELD_RESOURCE_COUNT, FIELD_SHAPE, FIELD_UPDATE_COUNT, SHAPE_LEGACY,
};
use fleetpol_core::{log_op_end, log_op_error, log_op_start, Set, Update, Updates};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_measures_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, started = Instant::now());

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    let duration: u64 = end_events[0]
        .field(FIELD_DURATION_MS)
        .expect("end carries a duration")
        .parse()
        .unwrap();
    assert!(duration < 60_000);
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = PolicyError::MalformedInterchangeValue {
        message: "expected object".to_string(),
    };
    log_op_error!(op_name, err, started = Instant::now());

    let events = capture.events_for_op(op_name);
    let error_event = events
        .iter()
        .find(|e| e.event() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(
        error_event.field(FIELD_ERR_CODE),
        Some(ExErrorKind::MalformedInterchangeValue.code())
    );
    assert_eq!(
        error_event.field(FIELD_ERR_KIND),
        Some("MalformedInterchangeValue")
    );
    assert!(error_event.field(FIELD_DURATION_MS).is_some());
    // The macro borrows, so the error is still usable afterwards
    assert!(err.to_string().contains("expected object"));
}

#[test]
fn test_log_macros_pass_extra_fields_through() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, resource_count = 3, update_count = 1);

    let events = capture.events_for_op(op_name);
    let start_event = events.first().expect("Should have start event");

    assert_eq!(start_event.field(FIELD_RESOURCE_COUNT), Some("3"));
    assert_eq!(start_event.field(FIELD_UPDATE_COUNT), Some("1"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_decode_set_emits_start_and_end() {
    let capture = init_test_capture();

    Set::from_json(r#"{"locked":"true","automated":"true","ignore":"true"}"#).unwrap();

    capture.assert_event_exists("decode_set", EVENT_START);
    let found = capture.count_events(|e| {
        e.is("decode_set", EVENT_END)
            && e.field(FIELD_POLICY_COUNT) == Some("3")
            && e.field(FIELD_DURATION_MS).is_some()
    });
    assert!(found >= 1, "Should log the decoded policy count");
}

#[test]
fn test_decode_set_failure_emits_error_event() {
    let capture = init_test_capture();

    let _ = Set::from_json(r#"{"locked":false}"#).unwrap_err();

    let code = ExErrorKind::MalformedInterchangeValue.code();
    let found = capture.count_events(|e| {
        e.is("decode_set", EVENT_END_ERROR) && e.field(FIELD_ERR_CODE) == Some(code)
    });
    assert!(found >= 1, "Should log the malformed decode");
}

#[test]
fn test_legacy_decode_is_recorded() {
    let capture = init_test_capture();

    Set::from_json(r#"["automated","ignore"]"#).unwrap();

    let found = capture.count_events(|e| {
        e.field(FIELD_SHAPE) == Some(SHAPE_LEGACY) && e.field(FIELD_POLICY_COUNT) == Some("2")
    });
    assert!(found >= 1, "Should record the legacy shape");
}

#[test]
fn test_apply_updates_emits_counts() {
    let capture = init_test_capture();
    let updates = Updates::new().with(
        resource("frozen"),
        Update::new(Set::new(), Set::new().add(&[LOCKED])),
    );

    let _ = updates.apply(&sample_fleet());

    let starts = capture.count_events(|e| {
        e.is("apply_updates", EVENT_START)
            && e.field(FIELD_RESOURCE_COUNT) == Some("4")
            && e.field(FIELD_UPDATE_COUNT) == Some("1")
    });
    assert!(starts >= 1);
    let ends = capture.count_events(|e| {
        e.is("apply_updates", EVENT_END) && e.field(FIELD_RESOURCE_COUNT) == Some("4")
    });
    assert!(ends >= 1);
}
