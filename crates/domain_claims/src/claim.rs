//! Claim aggregate

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{text_enum, ClaimId, ClientId, DomainError, Patch, PolicyId};

/// Claim status
///
/// Nominal flow: Pending -> UnderReview -> Approved/Denied -> Paid, with
/// Closed reachable from any open state. Status assignment is not
/// restricted to this flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Filed, not yet looked at
    #[default]
    Pending,
    /// Being assessed
    UnderReview,
    /// Accepted with an approved amount
    Approved,
    /// Rejected
    Denied,
    /// Payout completed
    Paid,
    /// Closed without further action
    Closed,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 6] = [
        ClaimStatus::Pending,
        ClaimStatus::UnderReview,
        ClaimStatus::Approved,
        ClaimStatus::Denied,
        ClaimStatus::Paid,
        ClaimStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::UnderReview => "under_review",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Denied => "denied",
            ClaimStatus::Paid => "paid",
            ClaimStatus::Closed => "closed",
        }
    }
}

text_enum!(ClaimStatus, "claim status", ClaimStatus::ALL);

/// A request for payout under a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    /// `CLM-XXXXXXXX` unless supplied
    pub claim_number: String,
    pub policy_id: Option<PolicyId>,
    /// Inferred from the policy when not supplied
    pub client_id: Option<ClientId>,
    pub incident_date: Option<NaiveDate>,
    pub report_date: NaiveDate,
    pub description: String,
    pub status: ClaimStatus,
    /// Requested amount
    pub claim_amount: Decimal,
    /// Set by approval only
    pub approved_amount: Option<Decimal>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub is_active: bool,
    pub version: i64,
}

/// Data for filing a claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClaim {
    pub claim_number: Option<String>,
    pub policy_id: Option<PolicyId>,
    pub client_id: Option<ClientId>,
    pub incident_date: Option<NaiveDate>,
    pub report_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ClaimStatus,
    pub claim_amount: Decimal,
}

/// Partial update of a claim
///
/// Carries no approved amount; that changes only through approval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimPatch {
    pub policy_id: Patch<PolicyId>,
    pub client_id: Patch<ClientId>,
    pub incident_date: Patch<NaiveDate>,
    pub description: Patch<String>,
    pub status: Patch<ClaimStatus>,
    pub claim_amount: Patch<Decimal>,
    pub is_active: Patch<bool>,
}

impl Claim {
    /// Builds a claim filed on `today`
    pub fn file(new: NewClaim, today: NaiveDate) -> Self {
        let id = ClaimId::new();
        Self {
            claim_number: new
                .claim_number
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| id.business_number()),
            id,
            policy_id: new.policy_id,
            client_id: new.client_id,
            incident_date: new.incident_date,
            report_date: new.report_date.unwrap_or(today),
            description: new.description,
            status: new.status,
            claim_amount: new.claim_amount,
            approved_amount: None,
            created_at: today,
            updated_at: today,
            is_active: true,
            version: 1,
        }
    }

    /// Sets the status with no adjacency check
    pub fn set_status(&mut self, status: ClaimStatus, today: NaiveDate) {
        self.status = status;
        self.updated_at = today;
    }

    /// Records an approval; bounds are checked by the caller
    pub fn approve(&mut self, approved_amount: Decimal, today: NaiveDate) {
        self.approved_amount = Some(approved_amount);
        self.status = ClaimStatus::Approved;
        self.updated_at = today;
    }

    /// Amount that may be paid out, present only for approved claims
    pub fn payable_amount(&self) -> Option<Decimal> {
        match self.status {
            ClaimStatus::Approved => self.approved_amount,
            _ => None,
        }
    }

    /// Returns a copy with the patch applied and `updated_at` set to `today`
    pub fn apply_patch(&self, patch: ClaimPatch, today: NaiveDate) -> Result<Claim, DomainError> {
        let mut next = self.clone();
        patch.policy_id.apply_to(&mut next.policy_id);
        patch.client_id.apply_to(&mut next.client_id);
        patch.incident_date.apply_to(&mut next.incident_date);
        patch.description.apply_required("description", &mut next.description)?;
        patch.status.apply_required("status", &mut next.status)?;
        patch.claim_amount.apply_required("claim_amount", &mut next.claim_amount)?;
        patch.is_active.apply_required("is_active", &mut next.is_active)?;
        next.updated_at = today;
        Ok(next)
    }
}
