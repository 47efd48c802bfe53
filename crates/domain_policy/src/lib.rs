//! Policy Administration Domain
//!
//! Policies, their status and billing frequency, and the premium
//! calculator used when a policy is issued.
//!
//! # Policy Lifecycle
//!
//! ```text
//! Pending -> Active -> Expired
//!                  \-> Canceled
//! ```
//!
//! Only active policies accept claims.

pub mod policy;
pub mod ports;
pub mod premium;
pub mod services;

pub use policy::{NewPolicy, PaymentFrequency, Policy, PolicyPatch, PolicyStatus, PolicyType};
pub use ports::{PolicyRepository, PolicyRepositoryExt};
pub use premium::{calculate_premium, premium_for, type_coefficient, BASE_RATE};
pub use services::PolicyService;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockPolicyRepository;
