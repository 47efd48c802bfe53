//! Claims Domain Ports

use async_trait::async_trait;

use core_kernel::{ClaimId, ClientId, DomainError, DomainPort, Pagination, PolicyId, PortError};

use crate::claim::Claim;

/// Persistence port for claims
#[async_trait]
pub trait ClaimRepository: DomainPort {
    async fn get_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Stores a new claim; a taken id or claim number is a `Conflict`
    async fn create(&self, claim: Claim) -> Result<Claim, PortError>;

    /// Replaces a stored claim if its version still matches
    ///
    /// # Returns
    ///
    /// The claim with its version bumped, or `PortError::Conflict` when
    /// another writer got there first
    async fn update(&self, claim: Claim) -> Result<Claim, PortError>;

    async fn delete(&self, id: ClaimId) -> Result<bool, PortError>;

    async fn list(&self, page: Pagination) -> Result<Vec<Claim>, PortError>;

    async fn get_by_claim_number(&self, claim_number: &str) -> Result<Option<Claim>, PortError>;

    async fn get_by_policy_id(&self, policy_id: PolicyId, page: Pagination) -> Result<Vec<Claim>, PortError>;

    async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Claim>, PortError>;
}

#[async_trait]
pub trait ClaimRepositoryExt: ClaimRepository {
    /// Gets a claim or fails with `DomainError::NotFound`
    async fn require(&self, id: ClaimId) -> Result<Claim, DomainError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Claim", id))
    }
}

impl<T: ClaimRepository + ?Sized> ClaimRepositoryExt for T {}

/// Mock implementation of ClaimRepository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of ClaimRepository
    ///
    /// Counts writes so tests can assert that a rejected operation
    /// persisted nothing.
    #[derive(Debug, Default, Clone)]
    pub struct MockClaimRepository {
        claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
        writes: Arc<AtomicUsize>,
    }

    impl MockClaimRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with claims for testing
        pub async fn with_claims(claims: Vec<Claim>) -> Self {
            let repo = Self::new();
            for claim in claims {
                repo.claims.write().await.insert(claim.id, claim);
            }
            repo
        }

        /// Successful create and update calls so far
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        async fn filtered(&self, keep: impl Fn(&Claim) -> bool) -> Vec<Claim> {
            let mut all: Vec<_> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| keep(c))
                .cloned()
                .collect();
            all.sort_by(|a, b| (a.created_at, &a.claim_number).cmp(&(b.created_at, &b.claim_number)));
            all
        }
    }

    impl DomainPort for MockClaimRepository {}

    #[async_trait]
    impl ClaimRepository for MockClaimRepository {
        async fn get_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            Ok(self.claims.read().await.get(&id).cloned())
        }

        async fn create(&self, claim: Claim) -> Result<Claim, PortError> {
            let mut claims = self.claims.write().await;
            if claims.contains_key(&claim.id) {
                return Err(PortError::conflict(format!("Claim {} already exists", claim.id)));
            }
            if claims.values().any(|c| c.claim_number == claim.claim_number) {
                return Err(PortError::conflict(format!(
                    "claim number {} is already in use",
                    claim.claim_number
                )));
            }
            claims.insert(claim.id, claim.clone());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(claim)
        }

        async fn update(&self, mut claim: Claim) -> Result<Claim, PortError> {
            let mut claims = self.claims.write().await;
            let stored = claims
                .get(&claim.id)
                .ok_or_else(|| PortError::not_found("Claim", claim.id))?;
            if stored.version != claim.version {
                return Err(PortError::stale_version("Claim", claim.id, claim.version));
            }
            claim.version += 1;
            claims.insert(claim.id, claim.clone());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(claim)
        }

        async fn delete(&self, id: ClaimId) -> Result<bool, PortError> {
            Ok(self.claims.write().await.remove(&id).is_some())
        }

        async fn list(&self, page: Pagination) -> Result<Vec<Claim>, PortError> {
            Ok(page.apply(self.filtered(|_| true).await))
        }

        async fn get_by_claim_number(&self, claim_number: &str) -> Result<Option<Claim>, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .find(|c| c.claim_number == claim_number)
                .cloned())
        }

        async fn get_by_policy_id(&self, policy_id: PolicyId, page: Pagination) -> Result<Vec<Claim>, PortError> {
            Ok(page.apply(self.filtered(|c| c.policy_id == Some(policy_id)).await))
        }

        async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Claim>, PortError> {
            Ok(page.apply(self.filtered(|c| c.client_id == Some(client_id)).await))
        }
    }
}
