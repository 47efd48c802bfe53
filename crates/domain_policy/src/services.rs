//! Policy application service
//!
//! Issues policies against existing clients and prices them with the
//! premium calculator.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use core_kernel::money::{ensure_non_negative, ensure_positive};
use core_kernel::{ClientId, Clock, DomainError, DomainResult, Pagination, PolicyId};
use domain_client::{ClientRepository, ClientRepositoryExt};

use crate::policy::{NewPolicy, Policy, PolicyPatch, PolicyType};
use crate::ports::{PolicyRepository, PolicyRepositoryExt};
use crate::premium::{calculate_premium, premium_for};

/// Service for issuing and maintaining policies
#[derive(Clone)]
pub struct PolicyService {
    policies: Arc<dyn PolicyRepository>,
    clients: Arc<dyn ClientRepository>,
    clock: Arc<dyn Clock>,
}

impl PolicyService {
    pub fn new(
        policies: Arc<dyn PolicyRepository>,
        clients: Arc<dyn ClientRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { policies, clients, clock }
    }

    /// Issues a new policy
    ///
    /// This method:
    /// 1. Generates the id and, if none was given, the `POL-` number
    /// 2. Stamps `created_at` with today's date
    /// 3. Requires the client to exist
    /// 4. Calculates the premium when none (or zero) was supplied
    ///
    /// # Errors
    ///
    /// * `Validation` - coverage not positive or a negative premium
    /// * `NotFound` - the client does not exist
    pub async fn create(&self, new: NewPolicy) -> DomainResult<Policy> {
        ensure_positive("coverage_amount", new.coverage_amount)?;
        if let Some(premium) = new.premium_amount {
            ensure_non_negative("premium_amount", premium)?;
        }

        self.clients.require(new.client_id).await?;

        let needs_premium = new.premium_amount.map_or(true, |p| p.is_zero());
        let mut policy = Policy::from_new(new, self.clock.today());
        if needs_premium {
            policy = calculate_premium(policy);
        }

        let policy = self.policies.create(policy).await?;
        info!(
            policy_id = %policy.id,
            policy_number = %policy.policy_number,
            premium = %policy.premium_amount,
            "Policy created"
        );
        Ok(policy)
    }

    /// Quotes a premium without persisting anything
    pub fn quote_premium(&self, coverage_amount: Decimal, policy_type: PolicyType) -> DomainResult<Decimal> {
        ensure_non_negative("coverage_amount", coverage_amount)?;
        Ok(premium_for(coverage_amount, policy_type))
    }

    pub async fn get(&self, id: PolicyId) -> DomainResult<Policy> {
        self.policies.require(id).await
    }

    pub async fn get_by_policy_number(&self, policy_number: &str) -> DomainResult<Policy> {
        debug!(policy_number, "Looking up policy by number");
        self.policies
            .get_by_policy_number(policy_number)
            .await?
            .ok_or_else(|| DomainError::not_found("Policy", policy_number))
    }

    pub async fn list(&self, page: Pagination) -> DomainResult<Vec<Policy>> {
        Ok(self.policies.list(page).await?)
    }

    pub async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> DomainResult<Vec<Policy>> {
        Ok(self.policies.get_by_client_id(client_id, page).await?)
    }

    pub async fn get_active_policies(&self, page: Pagination) -> DomainResult<Vec<Policy>> {
        Ok(self.policies.get_active_policies(page).await?)
    }

    /// Applies a partial update
    ///
    /// A new `client_id` must reference an existing client.
    pub async fn update(&self, id: PolicyId, patch: PolicyPatch) -> DomainResult<Policy> {
        let current = self.policies.require(id).await?;
        if let Some(client_id) = patch.client_id.as_set() {
            self.clients.require(*client_id).await?;
        }
        if let Some(coverage) = patch.coverage_amount.as_set() {
            ensure_positive("coverage_amount", *coverage)?;
        }
        if let Some(premium) = patch.premium_amount.as_set() {
            ensure_non_negative("premium_amount", *premium)?;
        }

        let saved = self.policies.update(current.apply_patch(patch)?).await?;
        info!(policy_id = %id, status = %saved.status, version = saved.version, "Policy updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: PolicyId) -> DomainResult<()> {
        if !self.policies.delete(id).await? {
            return Err(DomainError::not_found("Policy", id));
        }
        info!(policy_id = %id, "Policy deleted");
        Ok(())
    }
}
