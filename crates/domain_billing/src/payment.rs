//! Payment records
//!
//! A payment is money owed by a client (premium) or to a client (claim
//! payout, refund). It is created pending and completed by processing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{text_enum, ClaimId, ClientId, DomainError, Patch, PaymentId, PolicyId};

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting processing
    #[default]
    Pending,
    /// Payment completed successfully
    Completed,
    /// Payment failed
    Failed,
    /// Payment was refunded
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

text_enum!(PaymentStatus, "payment status", PaymentStatus::ALL);

/// What the money is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Client pays the policy premium
    Premium,
    /// Insurer pays an approved claim
    ClaimPayout,
    /// Money returned to the client
    Refund,
}

impl PaymentType {
    pub const ALL: [PaymentType; 3] = [PaymentType::Premium, PaymentType::ClaimPayout, PaymentType::Refund];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Premium => "premium",
            PaymentType::ClaimPayout => "claim_payout",
            PaymentType::Refund => "refund",
        }
    }
}

text_enum!(PaymentType, "payment type", PaymentType::ALL);

/// A payment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    /// `PAY-XXXXXXXX` unless supplied
    pub payment_number: String,
    pub client_id: ClientId,
    pub policy_id: Option<PolicyId>,
    pub claim_id: Option<ClaimId>,
    pub amount: Decimal,
    /// Set when the payment is processed
    pub payment_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    /// Free text such as "card" or "bank_transfer"
    pub payment_method: Option<String>,
    pub description: String,
    pub created_at: NaiveDate,
    pub is_active: bool,
    pub version: i64,
}

/// Data for recording a payment
///
/// Any of client, policy and claim may be left out as long as the client
/// can be inferred from the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub payment_number: Option<String>,
    pub client_id: Option<ClientId>,
    pub policy_id: Option<PolicyId>,
    pub claim_id: Option<ClaimId>,
    pub amount: Decimal,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Partial update of a payment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentPatch {
    pub amount: Patch<Decimal>,
    pub payment_date: Patch<NaiveDate>,
    pub due_date: Patch<NaiveDate>,
    pub status: Patch<PaymentStatus>,
    pub payment_method: Patch<String>,
    pub description: Patch<String>,
    pub is_active: Patch<bool>,
}

impl Payment {
    /// Builds a payment for an already-resolved client
    pub fn from_new(new: NewPayment, client_id: ClientId, created_at: NaiveDate) -> Self {
        let id = PaymentId::new();
        Self {
            payment_number: new
                .payment_number
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| id.business_number()),
            id,
            client_id,
            policy_id: new.policy_id,
            claim_id: new.claim_id,
            amount: new.amount,
            payment_date: None,
            due_date: new.due_date,
            status: new.status,
            payment_type: new.payment_type,
            payment_method: new.payment_method,
            description: new.description,
            created_at,
            is_active: true,
            version: 1,
        }
    }

    /// Marks the payment completed on `date`
    pub fn complete(&mut self, date: NaiveDate) {
        self.payment_date = Some(date);
        self.status = PaymentStatus::Completed;
    }

    pub fn apply_patch(&self, patch: PaymentPatch) -> Result<Payment, DomainError> {
        let mut next = self.clone();
        patch.amount.apply_required("amount", &mut next.amount)?;
        patch.payment_date.apply_to(&mut next.payment_date);
        patch.due_date.apply_to(&mut next.due_date);
        patch.status.apply_required("status", &mut next.status)?;
        patch.payment_method.apply_to(&mut next.payment_method);
        patch.description.apply_required("description", &mut next.description)?;
        patch.is_active.apply_required("is_active", &mut next.is_active)?;
        Ok(next)
    }
}
