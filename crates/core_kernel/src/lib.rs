//! Core Kernel - Foundational types and utilities for the insurance system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers and business numbers
//! - Domain and port error types
//! - Repository port markers and pagination
//! - Injectable clock, partial-update values, cent rounding

pub mod clock;
pub mod error;
pub mod identifiers;
pub mod money;
pub mod patch;
pub mod ports;
pub mod text_enum;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use identifiers::{ClaimId, ClientId, PaymentId, PolicyId, UserId};
pub use money::round_half_up_cents;
pub use patch::Patch;
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, Pagination, PortError};
