//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;
use tourforge_core::ErrorKind;

#[test]
fn test_time_termination_zero_limit() {
    let scope = SolveScope::new();
    let term = TimeTermination::new(Duration::ZERO);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination_not_reached() {
    let scope = SolveScope::new();
    let term = TimeTermination::seconds(3600);
    assert!(!term.is_terminated(&scope));
    assert_eq!(
        term.cause(),
        TerminationCause::TimeLimit(Duration::from_secs(3600))
    );
}

#[test]
fn test_external_termination() {
    let scope = SolveScope::new();
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(Arc::clone(&flag));

    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_cause_into_error() {
    let snapshot = SolveSnapshot {
        iterations: 2,
        cuts_added: 4,
        last_objective: Some(10.0),
    };
    let err = TerminationCause::Cancelled.into_error(snapshot);
    assert!(matches!(err, TourForgeError::Cancelled { .. }));
    assert_eq!(err.kind(), ErrorKind::SafetyLimit);
    assert_eq!(err.snapshot(), Some(&snapshot));

    let err = TerminationCause::TimeLimit(Duration::from_millis(5)).into_error(snapshot);
    assert!(matches!(
        err,
        TourForgeError::TimeLimitExceeded { limit, .. } if limit == Duration::from_millis(5)
    ));
}
