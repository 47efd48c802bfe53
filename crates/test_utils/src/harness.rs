//! Services wired to in-memory repositories
//!
//! Every service shares the same mock repositories and a clock fixed at
//! [`TemporalFixtures::today`], so a test can drive a whole client, policy,
//! claim and payment flow and then inspect the stored state.

use std::sync::Arc;

use core_kernel::{Clock, DomainResult};
use domain_billing::{MockPaymentRepository, PaymentService};
use domain_claims::{Claim, ClaimService, MockClaimRepository};
use domain_client::{Client, ClientService, MockClientRepository};
use domain_policy::{MockPolicyRepository, Policy, PolicyService};
use domain_user::{MockUserRepository, PasswordHasher, UserService};

use crate::builders::{NewClaimBuilder, NewPolicyBuilder};
use crate::fixtures::{ClientFixtures, TemporalFixtures};

pub struct InMemorySystem {
    pub client_repo: Arc<MockClientRepository>,
    pub policy_repo: Arc<MockPolicyRepository>,
    pub claim_repo: Arc<MockClaimRepository>,
    pub payment_repo: Arc<MockPaymentRepository>,
    pub user_repo: Arc<MockUserRepository>,
    pub clients: ClientService,
    pub policies: PolicyService,
    pub claims: ClaimService,
    pub payments: PaymentService,
    pub users: UserService,
}

impl InMemorySystem {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(TemporalFixtures::clock()))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let client_repo = Arc::new(MockClientRepository::new());
        let policy_repo = Arc::new(MockPolicyRepository::new());
        let claim_repo = Arc::new(MockClaimRepository::new());
        let payment_repo = Arc::new(MockPaymentRepository::new());
        let user_repo = Arc::new(MockUserRepository::new());

        Self {
            clients: ClientService::new(client_repo.clone(), clock.clone()),
            policies: PolicyService::new(policy_repo.clone(), client_repo.clone(), clock.clone()),
            claims: ClaimService::new(
                claim_repo.clone(),
                policy_repo.clone(),
                client_repo.clone(),
                clock.clone(),
            ),
            payments: PaymentService::new(
                payment_repo.clone(),
                policy_repo.clone(),
                claim_repo.clone(),
                client_repo.clone(),
                clock.clone(),
            ),
            users: UserService::new(user_repo.clone(), cheap_hasher(), clock),
            client_repo,
            policy_repo,
            claim_repo,
            payment_repo,
            user_repo,
        }
    }

    /// Registers a random client
    pub async fn client(&self) -> DomainResult<Client> {
        self.clients.register(ClientFixtures::random()).await
    }

    /// Registers a client holding the default active life policy
    pub async fn insured(&self) -> DomainResult<(Client, Policy)> {
        let client = self.client().await?;
        let policy = self.policies.create(NewPolicyBuilder::new(client.id).build()).await?;
        Ok((client, policy))
    }

    /// Files the default claim against a fresh insured client
    pub async fn claimant(&self) -> DomainResult<(Client, Policy, Claim)> {
        let (client, policy) = self.insured().await?;
        let claim = self.claims.create(NewClaimBuilder::new(policy.id).build()).await?;
        Ok((client, policy, claim))
    }
}

impl Default for InMemorySystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Argon2 with minimal cost so tests stay fast
pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_params(1024, 1, 1).unwrap_or_default()
}
