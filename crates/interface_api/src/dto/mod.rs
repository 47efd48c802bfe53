//! Request and response bodies that are not domain types

pub mod auth;
pub mod claims;
pub mod common;
pub mod payments;
pub mod policies;

pub use auth::{ChangePasswordRequest, LoginRequest, TokenResponse, UpdateRolesRequest};
pub use claims::{ApproveClaimRequest, UpdateClaimStatusRequest};
pub use common::{ListQuery, SearchQuery};
pub use payments::ProcessPaymentRequest;
pub use policies::{CalculatePremiumRequest, PremiumQuoteResponse};
