//! Property-Based Test Generators
//!
//! proptest strategies producing values that respect the domain's own
//! constraints (positive amounts with two decimals, in-range dates).

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_billing::{PaymentStatus, PaymentType};
use domain_claims::ClaimStatus;
use domain_policy::{PaymentFrequency, PolicyStatus, PolicyType};

/// Positive amounts with cent precision, 0.01 to 10 000 000.00
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Amounts with up to four decimals, for rounding checks
pub fn fine_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// A claim amount paired with a positive approved amount that does not exceed it
pub fn claim_and_approval_strategy() -> impl Strategy<Value = (Decimal, Decimal)> {
    (1i64..100_000_000i64).prop_flat_map(|claim_cents| {
        (Just(Decimal::new(claim_cents, 2)), (1i64..=claim_cents).prop_map(|c| Decimal::new(c, 2)))
    })
}

pub fn policy_type_strategy() -> impl Strategy<Value = PolicyType> {
    proptest::sample::select(PolicyType::ALL.to_vec())
}

pub fn policy_status_strategy() -> impl Strategy<Value = PolicyStatus> {
    proptest::sample::select(PolicyStatus::ALL.to_vec())
}

pub fn payment_frequency_strategy() -> impl Strategy<Value = PaymentFrequency> {
    proptest::sample::select(PaymentFrequency::ALL.to_vec())
}

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    proptest::sample::select(ClaimStatus::ALL.to_vec())
}

pub fn payment_status_strategy() -> impl Strategy<Value = PaymentStatus> {
    proptest::sample::select(PaymentStatus::ALL.to_vec())
}

pub fn payment_type_strategy() -> impl Strategy<Value = PaymentType> {
    proptest::sample::select(PaymentType::ALL.to_vec())
}

/// Any day of 2024
pub fn date_2024_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..366i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default() + Duration::days(days)
    })
}
