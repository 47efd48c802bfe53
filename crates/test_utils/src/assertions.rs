//! Custom Test Assertions
//!
//! Assertion helpers that print the offending value or error kind instead
//! of a bare `assert!` failure.

use std::fmt::Debug;

use rust_decimal::Decimal;

use core_kernel::{round_half_up_cents, DomainError, DomainResult};
use domain_billing::{Payment, PaymentStatus};
use domain_policy::{premium_for, Policy};

/// Asserts two amounts are equal once both are rounded to cents
pub fn assert_amount_eq(actual: Decimal, expected: Decimal) {
    assert_eq!(
        round_half_up_cents(actual),
        round_half_up_cents(expected),
        "Amount mismatch: actual={actual}, expected={expected}"
    );
}

/// Asserts the policy carries the calculated premium for its coverage and type
pub fn assert_calculated_premium(policy: &Policy) {
    let expected = premium_for(policy.coverage_amount, policy.policy_type);
    assert_eq!(
        policy.premium_amount, expected,
        "Policy {} premium {} does not match calculated {} for {} coverage {}",
        policy.policy_number, policy.premium_amount, expected, policy.policy_type, policy.coverage_amount
    );
}

/// Asserts a payment is completed and dated
pub fn assert_settled(payment: &Payment) {
    assert_eq!(
        payment.status,
        PaymentStatus::Completed,
        "Payment {} is {}, expected completed",
        payment.payment_number,
        payment.status
    );
    assert!(
        payment.payment_date.is_some(),
        "Completed payment {} has no payment date",
        payment.payment_number
    );
}

fn expect_err<T: Debug>(result: DomainResult<T>, kind: &str) -> DomainError {
    match result {
        Ok(value) => panic!("Expected {kind} error, got Ok({value:?})"),
        Err(e) => e,
    }
}

pub fn assert_not_found<T: Debug>(result: DomainResult<T>) {
    let err = expect_err(result, "not found");
    assert!(err.is_not_found(), "Expected not found, got {err:?}");
}

pub fn assert_invalid_operation<T: Debug>(result: DomainResult<T>) {
    let err = expect_err(result, "invalid operation");
    assert!(
        matches!(err, DomainError::InvalidOperation(_)),
        "Expected invalid operation, got {err:?}"
    );
}

pub fn assert_business_rule<T: Debug>(result: DomainResult<T>) {
    let err = expect_err(result, "business rule");
    assert!(
        matches!(err, DomainError::BusinessRuleViolation(_)),
        "Expected business rule violation, got {err:?}"
    );
}

pub fn assert_validation<T: Debug>(result: DomainResult<T>) {
    let err = expect_err(result, "validation");
    assert!(
        matches!(err, DomainError::Validation(_)),
        "Expected validation error, got {err:?}"
    );
}
