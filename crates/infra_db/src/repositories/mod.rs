//! PostgreSQL implementations of the domain repository ports
//!
//! Every adapter follows the same rules:
//! - enumerations are stored as their lowercase `as_str` text
//! - `update` writes only when the stored version matches, bumping it in
//!   the same statement
//! - errors leave as `PortError`

use std::fmt::Display;
use std::str::FromStr;

use core_kernel::{Pagination, PortError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{port_err, DatabaseError};

pub mod claim;
pub mod client;
pub mod payment;
pub mod policy;
pub mod user;

pub use claim::PgClaimRepository;
pub use client::PgClientRepository;
pub use payment::PgPaymentRepository;
pub use policy::PgPolicyRepository;
pub use user::PgUserRepository;

/// OFFSET and LIMIT binds for a page
pub(crate) fn bounds(page: Pagination) -> (i64, i64) {
    (i64::from(page.skip), i64::from(page.limit))
}

/// Parses a stored enumeration label
pub(crate) fn parse_label<T>(table: &'static str, value: &str) -> Result<T, PortError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| DatabaseError::corrupt(table, e).into())
}

/// Explains why a versioned `UPDATE` touched no row
pub(crate) async fn missing_or_stale(
    pool: &PgPool,
    table: &'static str,
    entity: &'static str,
    id: Uuid,
    version: i64,
) -> PortError {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
    match sqlx::query_scalar::<_, bool>(&sql).bind(id).fetch_one(pool).await {
        Ok(true) => PortError::stale_version(entity, id, version),
        Ok(false) => PortError::not_found(entity, id),
        Err(e) => port_err(e),
    }
}

/// `%term%` for ILIKE with the wildcard characters escaped
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_policy::PolicyStatus;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("ann"), "%ann%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn test_parse_label() {
        let status: PolicyStatus = parse_label("policies", "active").unwrap();
        assert_eq!(status, PolicyStatus::Active);
        let err = parse_label::<PolicyStatus>("policies", "dormant").unwrap_err();
        assert!(matches!(err, PortError::Internal { .. }));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(bounds(Pagination::new(20, 10).unwrap()), (20, 10));
    }
}
