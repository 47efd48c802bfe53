//! Claim lifecycle service
//!
//! Files claims against active policies, assigns status, and approves
//! payout amounts within the claim and policy limits. Every rule is checked
//! before the single write each operation performs.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use core_kernel::money::ensure_positive;
use core_kernel::{ClaimId, ClientId, Clock, DomainError, DomainResult, Pagination, PolicyId};
use domain_client::{ClientRepository, ClientRepositoryExt};
use domain_policy::{PolicyRepository, PolicyRepositoryExt};

use crate::claim::{Claim, ClaimPatch, ClaimStatus, NewClaim};
use crate::ports::{ClaimRepository, ClaimRepositoryExt};

/// Service for the claim lifecycle
#[derive(Clone)]
pub struct ClaimService {
    claims: Arc<dyn ClaimRepository>,
    policies: Arc<dyn PolicyRepository>,
    clients: Arc<dyn ClientRepository>,
    clock: Arc<dyn Clock>,
}

impl ClaimService {
    pub fn new(
        claims: Arc<dyn ClaimRepository>,
        policies: Arc<dyn PolicyRepository>,
        clients: Arc<dyn ClientRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            claims,
            policies,
            clients,
            clock,
        }
    }

    /// Files a new claim
    ///
    /// This method:
    /// 1. Generates the id and, if none was given, the `CLM-` number
    /// 2. Defaults report, created and updated dates to today
    /// 3. If a policy is referenced: requires it to exist and be active,
    ///    checks the incident date against the policy period, and adopts
    ///    the policy's client when none was given
    /// 4. If a client is known: requires it to exist
    ///
    /// # Errors
    ///
    /// * `NotFound` - the policy or client does not exist
    /// * `InvalidOperation` - the policy is not active, or the incident
    ///   date falls outside the policy period
    pub async fn create(&self, new: NewClaim) -> DomainResult<Claim> {
        ensure_positive("claim_amount", new.claim_amount)?;

        let mut claim = Claim::file(new, self.clock.today());

        if let Some(policy_id) = claim.policy_id {
            let policy = self.policies.require(policy_id).await?;

            if !policy.is_in_force() {
                warn!(policy_number = %policy.policy_number, status = %policy.status, "Claim rejected: policy not active");
                return Err(DomainError::invalid_operation(format!(
                    "Policy {} is not active",
                    policy.policy_number
                )));
            }

            if let Some(incident) = claim.incident_date {
                policy.check_within_period(incident)?;
            }

            if claim.client_id.is_none() {
                claim.client_id = Some(policy.client_id);
            }
        }

        if let Some(client_id) = claim.client_id {
            self.clients.require(client_id).await?;
        }

        let claim = self.claims.create(claim).await?;
        info!(
            claim_id = %claim.id,
            claim_number = %claim.claim_number,
            amount = %claim.claim_amount,
            "Claim filed"
        );
        Ok(claim)
    }

    /// Assigns a status; any status may follow any other
    pub async fn update_status(&self, id: ClaimId, status: ClaimStatus) -> DomainResult<Claim> {
        let mut claim = self.claims.require(id).await?;
        let previous = claim.status;
        claim.set_status(status, self.clock.today());

        let claim = self.claims.update(claim).await?;
        info!(claim_id = %id, from = %previous, to = %status, "Claim status changed");
        Ok(claim)
    }

    /// Approves a payout amount
    ///
    /// # Errors
    ///
    /// * `NotFound` - the claim, or the policy it references, does not exist
    /// * `Validation` - the amount is zero or negative
    /// * `BusinessRuleViolation` - the amount exceeds the claimed amount or
    ///   the policy coverage
    ///
    /// Re-approving an approved claim replaces the amount.
    pub async fn approve_claim(&self, id: ClaimId, approved_amount: Decimal) -> DomainResult<Claim> {
        ensure_positive("approved_amount", approved_amount)?;
        let mut claim = self.claims.require(id).await?;

        if approved_amount > claim.claim_amount {
            warn!(claim_id = %id, %approved_amount, claim_amount = %claim.claim_amount, "Approval exceeds claim amount");
            return Err(DomainError::business_rule(format!(
                "Approved amount {approved_amount} cannot exceed claim amount {}",
                claim.claim_amount
            )));
        }

        if let Some(policy_id) = claim.policy_id {
            let policy = self.policies.require(policy_id).await?;
            if approved_amount > policy.coverage_amount {
                warn!(claim_id = %id, %approved_amount, coverage = %policy.coverage_amount, "Approval exceeds policy coverage");
                return Err(DomainError::business_rule(format!(
                    "Approved amount {approved_amount} cannot exceed policy {} coverage {}",
                    policy.policy_number, policy.coverage_amount
                )));
            }
        }

        claim.approve(approved_amount, self.clock.today());
        let claim = self.claims.update(claim).await?;
        info!(claim_id = %id, %approved_amount, "Claim approved");
        Ok(claim)
    }

    pub async fn get(&self, id: ClaimId) -> DomainResult<Claim> {
        self.claims.require(id).await
    }

    pub async fn get_by_claim_number(&self, claim_number: &str) -> DomainResult<Claim> {
        debug!(claim_number, "Looking up claim by number");
        self.claims
            .get_by_claim_number(claim_number)
            .await?
            .ok_or_else(|| DomainError::not_found("Claim", claim_number))
    }

    pub async fn list(&self, page: Pagination) -> DomainResult<Vec<Claim>> {
        Ok(self.claims.list(page).await?)
    }

    pub async fn get_by_policy_id(&self, policy_id: PolicyId, page: Pagination) -> DomainResult<Vec<Claim>> {
        Ok(self.claims.get_by_policy_id(policy_id, page).await?)
    }

    pub async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> DomainResult<Vec<Claim>> {
        Ok(self.claims.get_by_client_id(client_id, page).await?)
    }

    /// Applies a partial update
    ///
    /// The patched claim must still satisfy the filing and approval rules:
    /// a newly referenced policy must be active, the incident date must fall
    /// in the policy period, and an approved amount must stay within the
    /// claim amount and the policy coverage.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the claim, or a referenced policy or client, does not exist
    /// * `InvalidOperation` - the new policy is not active, or the incident
    ///   date falls outside the policy period
    /// * `BusinessRuleViolation` - the approved amount no longer fits
    pub async fn update(&self, id: ClaimId, patch: ClaimPatch) -> DomainResult<Claim> {
        let current = self.claims.require(id).await?;
        if let Some(client_id) = patch.client_id.as_set() {
            self.clients.require(*client_id).await?;
        }
        if let Some(amount) = patch.claim_amount.as_set() {
            ensure_positive("claim_amount", *amount)?;
        }

        let next = current.apply_patch(patch, self.clock.today())?;

        if let Some(approved) = next.approved_amount {
            if approved > next.claim_amount {
                warn!(claim_id = %id, %approved, claim_amount = %next.claim_amount, "Update rejected: claim amount below approval");
                return Err(DomainError::business_rule(format!(
                    "Approved amount {approved} cannot exceed claim amount {}",
                    next.claim_amount
                )));
            }
        }

        let policy_changed = next.policy_id != current.policy_id;
        let incident_changed = next.incident_date != current.incident_date;
        if let Some(policy_id) = next.policy_id.filter(|_| policy_changed || incident_changed) {
            let policy = self.policies.require(policy_id).await?;

            if policy_changed {
                if !policy.is_in_force() {
                    warn!(policy_number = %policy.policy_number, status = %policy.status, "Update rejected: policy not active");
                    return Err(DomainError::invalid_operation(format!(
                        "Policy {} is not active",
                        policy.policy_number
                    )));
                }
                if let Some(approved) = next.approved_amount {
                    if approved > policy.coverage_amount {
                        return Err(DomainError::business_rule(format!(
                            "Approved amount {approved} cannot exceed policy {} coverage {}",
                            policy.policy_number, policy.coverage_amount
                        )));
                    }
                }
            }

            if let Some(incident) = next.incident_date {
                policy.check_within_period(incident)?;
            }
        }

        let saved = self.claims.update(next).await?;
        info!(claim_id = %id, version = saved.version, "Claim updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: ClaimId) -> DomainResult<()> {
        if !self.claims.delete(id).await? {
            return Err(DomainError::not_found("Claim", id));
        }
        info!(claim_id = %id, "Claim deleted");
        Ok(())
    }
}
