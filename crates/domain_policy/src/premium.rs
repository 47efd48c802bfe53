//! Premium calculation
//!
//! ```text
//! premium = round_half_up(coverage_amount × BASE_RATE × coefficient(type), 2)
//! ```
//!
//! The calculation is pure and uses exact decimal arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::round_half_up_cents;

use crate::policy::{Policy, PolicyType};

/// Share of the coverage amount charged before the type coefficient
pub const BASE_RATE: Decimal = dec!(0.05);

/// Per-type risk coefficient
pub fn type_coefficient(policy_type: PolicyType) -> Decimal {
    match policy_type {
        PolicyType::Life => dec!(1.5),
        PolicyType::Health => dec!(1.2),
        PolicyType::Property => dec!(0.8),
        PolicyType::Vehicle => dec!(1.0),
        PolicyType::Travel => dec!(0.6),
    }
}

/// Premium for `coverage_amount` under `policy_type`, rounded to cents
///
/// # Example
///
/// ```rust
/// use domain_policy::premium::premium_for;
/// use domain_policy::PolicyType;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(premium_for(dec!(100000), PolicyType::Life), dec!(7500.00));
/// ```
pub fn premium_for(coverage_amount: Decimal, policy_type: PolicyType) -> Decimal {
    round_half_up_cents(coverage_amount * BASE_RATE * type_coefficient(policy_type))
}

/// Returns the policy with its premium recomputed from coverage and type
pub fn calculate_premium(mut policy: Policy) -> Policy {
    policy.premium_amount = premium_for(policy.coverage_amount, policy.policy_type);
    policy
}
