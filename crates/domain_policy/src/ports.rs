//! Policy Domain Ports

use async_trait::async_trait;

use core_kernel::{ClientId, DomainError, DomainPort, Pagination, PolicyId, PortError};

use crate::policy::Policy;

/// Persistence port for policies
#[async_trait]
pub trait PolicyRepository: DomainPort {
    async fn get_by_id(&self, id: PolicyId) -> Result<Option<Policy>, PortError>;

    /// Stores a new policy; a taken id or policy number is a `Conflict`
    async fn create(&self, policy: Policy) -> Result<Policy, PortError>;

    /// Replaces a stored policy if its version still matches
    async fn update(&self, policy: Policy) -> Result<Policy, PortError>;

    async fn delete(&self, id: PolicyId) -> Result<bool, PortError>;

    async fn list(&self, page: Pagination) -> Result<Vec<Policy>, PortError>;

    async fn get_by_policy_number(&self, policy_number: &str) -> Result<Option<Policy>, PortError>;

    async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Policy>, PortError>;

    /// Policies whose status is active
    async fn get_active_policies(&self, page: Pagination) -> Result<Vec<Policy>, PortError>;
}

#[async_trait]
pub trait PolicyRepositoryExt: PolicyRepository {
    /// Gets a policy or fails with `DomainError::NotFound`
    async fn require(&self, id: PolicyId) -> Result<Policy, DomainError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Policy", id))
    }
}

impl<T: PolicyRepository + ?Sized> PolicyRepositoryExt for T {}

/// Mock implementation of PolicyRepository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of PolicyRepository
    #[derive(Debug, Default, Clone)]
    pub struct MockPolicyRepository {
        policies: Arc<RwLock<HashMap<PolicyId, Policy>>>,
    }

    impl MockPolicyRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with policies for testing
        pub async fn with_policies(policies: Vec<Policy>) -> Self {
            let repo = Self::new();
            for policy in policies {
                repo.policies.write().await.insert(policy.id, policy);
            }
            repo
        }

        pub async fn count(&self) -> usize {
            self.policies.read().await.len()
        }

        async fn filtered(&self, keep: impl Fn(&Policy) -> bool) -> Vec<Policy> {
            let mut all: Vec<_> = self
                .policies
                .read()
                .await
                .values()
                .filter(|p| keep(p))
                .cloned()
                .collect();
            all.sort_by(|a, b| (a.created_at, &a.policy_number).cmp(&(b.created_at, &b.policy_number)));
            all
        }
    }

    impl DomainPort for MockPolicyRepository {}

    #[async_trait]
    impl PolicyRepository for MockPolicyRepository {
        async fn get_by_id(&self, id: PolicyId) -> Result<Option<Policy>, PortError> {
            Ok(self.policies.read().await.get(&id).cloned())
        }

        async fn create(&self, policy: Policy) -> Result<Policy, PortError> {
            let mut policies = self.policies.write().await;
            if policies.contains_key(&policy.id) {
                return Err(PortError::conflict(format!("Policy {} already exists", policy.id)));
            }
            if policies.values().any(|p| p.policy_number == policy.policy_number) {
                return Err(PortError::conflict(format!(
                    "policy number {} is already in use",
                    policy.policy_number
                )));
            }
            policies.insert(policy.id, policy.clone());
            Ok(policy)
        }

        async fn update(&self, mut policy: Policy) -> Result<Policy, PortError> {
            let mut policies = self.policies.write().await;
            let stored = policies
                .get(&policy.id)
                .ok_or_else(|| PortError::not_found("Policy", policy.id))?;
            if stored.version != policy.version {
                return Err(PortError::stale_version("Policy", policy.id, policy.version));
            }
            policy.version += 1;
            policies.insert(policy.id, policy.clone());
            Ok(policy)
        }

        async fn delete(&self, id: PolicyId) -> Result<bool, PortError> {
            Ok(self.policies.write().await.remove(&id).is_some())
        }

        async fn list(&self, page: Pagination) -> Result<Vec<Policy>, PortError> {
            Ok(page.apply(self.filtered(|_| true).await))
        }

        async fn get_by_policy_number(&self, policy_number: &str) -> Result<Option<Policy>, PortError> {
            Ok(self
                .policies
                .read()
                .await
                .values()
                .find(|p| p.policy_number == policy_number)
                .cloned())
        }

        async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Policy>, PortError> {
            Ok(page.apply(self.filtered(|p| p.client_id == client_id).await))
        }

        async fn get_active_policies(&self, page: Pagination) -> Result<Vec<Policy>, PortError> {
            Ok(page.apply(self.filtered(|p| p.is_in_force()).await))
        }
    }
}
