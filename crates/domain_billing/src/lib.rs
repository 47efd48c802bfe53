//! Billing Domain - Payment Settlement
//!
//! Premium payments owed by clients and payouts on approved claims.
//!
//! # Client inference
//!
//! A payment always belongs to a client. When the caller leaves the client
//! out it is taken from the referenced policy first, then from the
//! referenced claim:
//!
//! ```rust,ignore
//! let payout = payments.create_claim_payout(claim.id).await?;
//! assert_eq!(payout.client_id, policy.client_id);
//! payments.process_payment(payout.id, None).await?;
//! ```

pub mod payment;
pub mod ports;
pub mod service;

pub use payment::{NewPayment, Payment, PaymentPatch, PaymentStatus, PaymentType};
pub use ports::{PaymentRepository, PaymentRepositoryExt};
pub use service::PaymentService;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockPaymentRepository;
