//! Test Utilities Crate
//!
//! Shared test infrastructure for the insurance backend test suite.
//!
//! # Modules
//!
//! - `fixtures`: fixed dates, amounts, ids and `fake` client data
//! - `builders`: builders for policy, claim and payment inputs
//! - `harness`: every service wired to in-memory repositories
//! - `database`: PostgreSQL containers with migrations applied
//! - `assertions`: assertion helpers for amounts and error kinds
//! - `generators`: proptest strategies

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;
pub mod harness;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
pub use harness::*;
