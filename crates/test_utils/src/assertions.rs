//! Custom Test Assertions
//!
//! Assertion helpers for verdicts and domain errors that give more meaningful
//! messages than a bare `assert_eq!`.

use core_kernel::Money;
use domain_eligibility::{EligibilityError, EligibilityVerdict, IneligibilityReason};

/// Asserts that an evaluation produced `Eligible`
///
/// # Panics
///
/// Panics on an error or an `Ineligible` verdict
pub fn assert_eligible(result: &Result<EligibilityVerdict, EligibilityError>) {
    match result {
        Ok(EligibilityVerdict::Eligible) => {}
        Ok(verdict) => panic!("Expected eligible, got {}", verdict),
        Err(e) => panic!("Expected eligible, got error: {}", e),
    }
}

/// Asserts that an evaluation produced `Ineligible` with the given details
pub fn assert_ineligible(
    result: &Result<EligibilityVerdict, EligibilityError>,
    reason: IneligibilityReason,
    limit_age: u32,
    actual_age: u32,
) {
    let expected = EligibilityVerdict::Ineligible {
        reason,
        limit_age,
        actual_age,
    };
    match result {
        Ok(verdict) => assert_eq!(
            *verdict, expected,
            "Verdict mismatch: actual={}, expected={}",
            verdict, expected
        ),
        Err(e) => panic!("Expected {}, got error: {}", expected, e),
    }
}

/// Asserts that a sum assured was rejected for exceeding `cap`
pub fn assert_sum_assured_exceeded(result: &Result<(), EligibilityError>, cap: Money, requested: Money) {
    match result {
        Err(EligibilityError::SumAssuredExceeded {
            cap: actual_cap,
            requested: actual_requested,
        }) => {
            assert_eq!(*actual_cap, cap, "Cap mismatch");
            assert_eq!(*actual_requested, requested, "Requested amount mismatch");
        }
        other => panic!("Expected SumAssuredExceeded, got {:?}", other),
    }
}
