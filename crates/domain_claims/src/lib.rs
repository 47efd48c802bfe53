//! Claims Management Domain
//!
//! Filing, status assignment and approval of claims against policies.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> UnderReview -> Approved -> Paid
//!                       \-> Denied
//! any open status -> Closed
//! ```
//!
//! The flow above is nominal. `ClaimService::update_status` accepts any
//! status; approval is the only path that sets an approved amount.

pub mod claim;
pub mod ports;
pub mod service;

pub use claim::{Claim, ClaimPatch, ClaimStatus, NewClaim};
pub use ports::{ClaimRepository, ClaimRepositoryExt};
pub use service::ClaimService;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockClaimRepository;
