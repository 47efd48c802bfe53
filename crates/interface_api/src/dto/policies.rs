//! Premium quote bodies

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_policy::PolicyType;

#[derive(Debug, Deserialize)]
pub struct CalculatePremiumRequest {
    pub coverage_amount: Decimal,
    pub policy_type: PolicyType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PremiumQuoteResponse {
    pub coverage_amount: Decimal,
    pub policy_type: PolicyType,
    pub premium_amount: Decimal,
}
