//! Billing Domain Ports

use async_trait::async_trait;

use core_kernel::{ClaimId, ClientId, DomainError, DomainPort, Pagination, PaymentId, PolicyId, PortError};

use crate::payment::Payment;

/// Persistence port for payments
#[async_trait]
pub trait PaymentRepository: DomainPort {
    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, PortError>;

    /// Stores a new payment; a taken id or payment number is a `Conflict`
    async fn create(&self, payment: Payment) -> Result<Payment, PortError>;

    /// Replaces a stored payment if its version still matches
    async fn update(&self, payment: Payment) -> Result<Payment, PortError>;

    async fn delete(&self, id: PaymentId) -> Result<bool, PortError>;

    async fn list(&self, page: Pagination) -> Result<Vec<Payment>, PortError>;

    async fn get_by_payment_number(&self, payment_number: &str) -> Result<Option<Payment>, PortError>;

    async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Payment>, PortError>;

    async fn get_by_policy_id(&self, policy_id: PolicyId, page: Pagination) -> Result<Vec<Payment>, PortError>;

    async fn get_by_claim_id(&self, claim_id: ClaimId, page: Pagination) -> Result<Vec<Payment>, PortError>;
}

#[async_trait]
pub trait PaymentRepositoryExt: PaymentRepository {
    /// Gets a payment or fails with `DomainError::NotFound`
    async fn require(&self, id: PaymentId) -> Result<Payment, DomainError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", id))
    }
}

impl<T: PaymentRepository + ?Sized> PaymentRepositoryExt for T {}

/// Mock implementation of PaymentRepository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of PaymentRepository
    #[derive(Debug, Default, Clone)]
    pub struct MockPaymentRepository {
        payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
        writes: Arc<AtomicUsize>,
    }

    impl MockPaymentRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Successful create and update calls so far
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        async fn filtered(&self, keep: impl Fn(&Payment) -> bool) -> Vec<Payment> {
            let mut all: Vec<_> = self
                .payments
                .read()
                .await
                .values()
                .filter(|p| keep(p))
                .cloned()
                .collect();
            all.sort_by(|a, b| (a.created_at, &a.payment_number).cmp(&(b.created_at, &b.payment_number)));
            all
        }
    }

    impl DomainPort for MockPaymentRepository {}

    #[async_trait]
    impl PaymentRepository for MockPaymentRepository {
        async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, PortError> {
            Ok(self.payments.read().await.get(&id).cloned())
        }

        async fn create(&self, payment: Payment) -> Result<Payment, PortError> {
            let mut payments = self.payments.write().await;
            if payments.contains_key(&payment.id) {
                return Err(PortError::conflict(format!("Payment {} already exists", payment.id)));
            }
            if payments.values().any(|p| p.payment_number == payment.payment_number) {
                return Err(PortError::conflict(format!(
                    "payment number {} is already in use",
                    payment.payment_number
                )));
            }
            payments.insert(payment.id, payment.clone());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(payment)
        }

        async fn update(&self, mut payment: Payment) -> Result<Payment, PortError> {
            let mut payments = self.payments.write().await;
            let stored = payments
                .get(&payment.id)
                .ok_or_else(|| PortError::not_found("Payment", payment.id))?;
            if stored.version != payment.version {
                return Err(PortError::stale_version("Payment", payment.id, payment.version));
            }
            payment.version += 1;
            payments.insert(payment.id, payment.clone());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(payment)
        }

        async fn delete(&self, id: PaymentId) -> Result<bool, PortError> {
            Ok(self.payments.write().await.remove(&id).is_some())
        }

        async fn list(&self, page: Pagination) -> Result<Vec<Payment>, PortError> {
            Ok(page.apply(self.filtered(|_| true).await))
        }

        async fn get_by_payment_number(&self, payment_number: &str) -> Result<Option<Payment>, PortError> {
            Ok(self
                .payments
                .read()
                .await
                .values()
                .find(|p| p.payment_number == payment_number)
                .cloned())
        }

        async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Payment>, PortError> {
            Ok(page.apply(self.filtered(|p| p.client_id == client_id).await))
        }

        async fn get_by_policy_id(&self, policy_id: PolicyId, page: Pagination) -> Result<Vec<Payment>, PortError> {
            Ok(page.apply(self.filtered(|p| p.policy_id == Some(policy_id)).await))
        }

        async fn get_by_claim_id(&self, claim_id: ClaimId, page: Pagination) -> Result<Vec<Payment>, PortError> {
            Ok(page.apply(self.filtered(|p| p.claim_id == Some(claim_id)).await))
        }
    }
}
