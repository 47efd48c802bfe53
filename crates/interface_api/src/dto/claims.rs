//! Claim lifecycle bodies

use rust_decimal::Decimal;
use serde::Deserialize;

use domain_claims::ClaimStatus;

#[derive(Debug, Deserialize)]
pub struct UpdateClaimStatusRequest {
    pub status: ClaimStatus,
}

#[derive(Debug, Deserialize)]
pub struct ApproveClaimRequest {
    pub approved_amount: Decimal,
}
