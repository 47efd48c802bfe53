//! Payment settlement service
//!
//! Records payments, infers the paying client from the policy or claim a
//! payment refers to, and derives premium and payout payments.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use core_kernel::money::ensure_positive;
use core_kernel::{ClaimId, ClientId, Clock, DomainError, DomainResult, Pagination, PaymentId, PolicyId};
use domain_claims::{ClaimRepository, ClaimRepositoryExt, ClaimStatus};
use domain_client::{ClientRepository, ClientRepositoryExt};
use domain_policy::{PolicyRepository, PolicyRepositoryExt};

use crate::payment::{NewPayment, Payment, PaymentPatch, PaymentStatus, PaymentType};
use crate::ports::{PaymentRepository, PaymentRepositoryExt};

/// Service for recording and settling payments
#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    policies: Arc<dyn PolicyRepository>,
    claims: Arc<dyn ClaimRepository>,
    clients: Arc<dyn ClientRepository>,
    clock: Arc<dyn Clock>,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        policies: Arc<dyn PolicyRepository>,
        claims: Arc<dyn ClaimRepository>,
        clients: Arc<dyn ClientRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            payments,
            policies,
            claims,
            clients,
            clock,
        }
    }

    /// Records a payment
    ///
    /// This method:
    /// 1. Requires an explicitly given client to exist
    /// 2. If a policy is referenced: requires it and adopts its client
    ///    when none is known yet
    /// 3. If a claim is referenced: requires it, then adopts its client
    ///    and its policy where those are still unknown
    /// 4. Persists the payment with a generated `PAY-` number
    ///
    /// A client taken from the policy wins over one taken from the claim.
    ///
    /// # Errors
    ///
    /// * `NotFound` - a referenced client, policy or claim does not exist
    /// * `Validation` - the amount is not positive, or no client could be
    ///   resolved
    pub async fn create(&self, mut new: NewPayment) -> DomainResult<Payment> {
        ensure_positive("amount", new.amount)?;

        if let Some(client_id) = new.client_id {
            self.clients.require(client_id).await?;
        }

        if let Some(policy_id) = new.policy_id {
            let policy = self.policies.require(policy_id).await?;
            if new.client_id.is_none() {
                new.client_id = Some(policy.client_id);
            }
        }

        if let Some(claim_id) = new.claim_id {
            let claim = self.claims.require(claim_id).await?;
            if new.client_id.is_none() {
                new.client_id = claim.client_id;
            }
            if new.policy_id.is_none() {
                new.policy_id = claim.policy_id;
            }
        }

        let Some(client_id) = new.client_id else {
            warn!(payment_type = %new.payment_type, "Payment rejected: no client could be resolved");
            return Err(DomainError::validation(
                "payment requires a client, directly or through its policy or claim",
            ));
        };

        let payment = Payment::from_new(new, client_id, self.clock.today());
        let payment = self.payments.create(payment).await?;
        info!(
            payment_id = %payment.id,
            payment_number = %payment.payment_number,
            payment_type = %payment.payment_type,
            amount = %payment.amount,
            "Payment recorded"
        );
        Ok(payment)
    }

    /// Completes a payment on the given date, or today
    ///
    /// Processing an already completed payment overwrites its date.
    pub async fn process_payment(&self, id: PaymentId, payment_date: Option<NaiveDate>) -> DomainResult<Payment> {
        let mut payment = self.payments.require(id).await?;
        let date = payment_date.unwrap_or_else(|| self.clock.today());
        payment.complete(date);

        let payment = self.payments.update(payment).await?;
        info!(payment_id = %id, payment_date = %date, "Payment processed");
        Ok(payment)
    }

    /// Raises a pending premium payment due today for the policy
    pub async fn create_premium_payment(&self, policy_id: PolicyId) -> DomainResult<Payment> {
        let policy = self.policies.require(policy_id).await?;

        self.create(NewPayment {
            payment_number: None,
            client_id: Some(policy.client_id),
            policy_id: Some(policy.id),
            claim_id: None,
            amount: policy.premium_amount,
            due_date: Some(self.clock.today()),
            status: PaymentStatus::Pending,
            payment_type: PaymentType::Premium,
            payment_method: None,
            description: format!("Premium payment for policy {}", policy.policy_number),
        })
        .await
    }

    /// Raises a pending payout for an approved claim
    ///
    /// # Errors
    ///
    /// * `NotFound` - the claim does not exist
    /// * `InvalidOperation` - the claim is not approved, or has no
    ///   approved amount
    pub async fn create_claim_payout(&self, claim_id: ClaimId) -> DomainResult<Payment> {
        let claim = self.claims.require(claim_id).await?;

        if claim.status != ClaimStatus::Approved {
            warn!(claim_id = %claim_id, status = %claim.status, "Payout rejected: claim not approved");
            return Err(DomainError::invalid_operation(format!(
                "Claim {} must be approved to create a payout, status is {}",
                claim.claim_number, claim.status
            )));
        }

        let Some(amount) = claim.payable_amount() else {
            warn!(claim_id = %claim_id, "Payout rejected: approved amount missing");
            return Err(DomainError::invalid_operation(format!(
                "Claim {} payout amount not set",
                claim.claim_number
            )));
        };

        self.create(NewPayment {
            payment_number: None,
            client_id: claim.client_id,
            policy_id: claim.policy_id,
            claim_id: Some(claim.id),
            amount,
            due_date: None,
            status: PaymentStatus::Pending,
            payment_type: PaymentType::ClaimPayout,
            payment_method: None,
            description: format!("Payout for claim {}", claim.claim_number),
        })
        .await
    }

    pub async fn get(&self, id: PaymentId) -> DomainResult<Payment> {
        self.payments.require(id).await
    }

    pub async fn get_by_payment_number(&self, payment_number: &str) -> DomainResult<Payment> {
        debug!(payment_number, "Looking up payment by number");
        self.payments
            .get_by_payment_number(payment_number)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", payment_number))
    }

    pub async fn list(&self, page: Pagination) -> DomainResult<Vec<Payment>> {
        Ok(self.payments.list(page).await?)
    }

    pub async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> DomainResult<Vec<Payment>> {
        Ok(self.payments.get_by_client_id(client_id, page).await?)
    }

    pub async fn get_by_policy_id(&self, policy_id: PolicyId, page: Pagination) -> DomainResult<Vec<Payment>> {
        Ok(self.payments.get_by_policy_id(policy_id, page).await?)
    }

    pub async fn get_by_claim_id(&self, claim_id: ClaimId, page: Pagination) -> DomainResult<Vec<Payment>> {
        Ok(self.payments.get_by_claim_id(claim_id, page).await?)
    }

    pub async fn update(&self, id: PaymentId, patch: PaymentPatch) -> DomainResult<Payment> {
        let current = self.payments.require(id).await?;
        if let Some(amount) = patch.amount.as_set() {
            ensure_positive("amount", *amount)?;
        }

        let next = current.apply_patch(patch)?;
        let saved = self.payments.update(next).await?;
        info!(payment_id = %id, version = saved.version, "Payment updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: PaymentId) -> DomainResult<()> {
        if !self.payments.delete(id).await? {
            return Err(DomainError::not_found("Payment", id));
        }
        info!(payment_id = %id, "Payment deleted");
        Ok(())
    }
}
