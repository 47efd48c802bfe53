//! HTTP request handlers

pub mod auth;
pub mod claims;
pub mod clients;
pub mod health;
pub mod payments;
pub mod policies;
pub mod users;
