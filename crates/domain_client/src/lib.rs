//! Client Management Domain
//!
//! A client is the natural person who holds policies, files claims and
//! makes payments. Clients are never hard-deleted by normal workflows;
//! they are deactivated instead.
//!
//! # Examples
//!
//! ```rust
//! use domain_client::{Client, NewClient};
//! use chrono::NaiveDate;
//!
//! let client = Client::register(
//!     NewClient {
//!         first_name: "Anna".to_string(),
//!         last_name: "Petrova".to_string(),
//!         email: "anna@example.com".to_string(),
//!         phone: "+1-555-0100".to_string(),
//!         birth_date: NaiveDate::from_ymd_opt(1990, 3, 1),
//!         address: "1 Main St".to_string(),
//!         passport_number: "AB123456".to_string(),
//!     },
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//! );
//! assert_eq!(client.full_name(), "Anna Petrova");
//! assert!(client.is_active);
//! ```

pub mod client;
pub mod ports;
pub mod service;

pub use client::{Client, ClientPatch, NewClient};
pub use ports::{ClientRepository, ClientRepositoryExt};
pub use service::ClientService;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockClientRepository;
