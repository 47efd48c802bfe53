//! Policy table adapter

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use core_kernel::{ClientId, DomainPort, Pagination, PolicyId, PortError};
use domain_policy::{Policy, PolicyRepository, PolicyStatus};

use super::{bounds, missing_or_stale, parse_label};
use crate::error::port_err;

const COLUMNS: &str = "id, policy_number, client_id, policy_type, status, start_date, end_date, \
                       coverage_amount, premium_amount, payment_frequency, created_at, \
                       description, is_active, version";

#[derive(Debug, FromRow)]
struct PolicyRow {
    id: Uuid,
    policy_number: String,
    client_id: Uuid,
    policy_type: String,
    status: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    coverage_amount: Decimal,
    premium_amount: Decimal,
    payment_frequency: String,
    created_at: NaiveDate,
    description: String,
    is_active: bool,
    version: i64,
}

impl TryFrom<PolicyRow> for Policy {
    type Error = PortError;

    fn try_from(row: PolicyRow) -> Result<Self, Self::Error> {
        Ok(Policy {
            id: PolicyId::from_uuid(row.id),
            policy_number: row.policy_number,
            client_id: ClientId::from_uuid(row.client_id),
            policy_type: parse_label("policies", &row.policy_type)?,
            status: parse_label("policies", &row.status)?,
            start_date: row.start_date,
            end_date: row.end_date,
            coverage_amount: row.coverage_amount,
            premium_amount: row.premium_amount,
            payment_frequency: parse_label("policies", &row.payment_frequency)?,
            created_at: row.created_at,
            description: row.description,
            is_active: row.is_active,
            version: row.version,
        })
    }
}

fn into_policies(rows: Vec<PolicyRow>) -> Result<Vec<Policy>, PortError> {
    rows.into_iter().map(Policy::try_from).collect()
}

/// `PolicyRepository` over the `policies` table
#[derive(Debug, Clone)]
pub struct PgPolicyRepository {
    pool: PgPool,
}

impl PgPolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgPolicyRepository {}

#[async_trait]
impl PolicyRepository for PgPolicyRepository {
    async fn get_by_id(&self, id: PolicyId) -> Result<Option<Policy>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM policies WHERE id = $1");
        sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?
            .map(Policy::try_from)
            .transpose()
    }

    async fn create(&self, policy: Policy) -> Result<Policy, PortError> {
        let sql = format!(
            "INSERT INTO policies ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(policy.id.as_uuid())
            .bind(&policy.policy_number)
            .bind(policy.client_id.as_uuid())
            .bind(policy.policy_type.as_str())
            .bind(policy.status.as_str())
            .bind(policy.start_date)
            .bind(policy.end_date)
            .bind(policy.coverage_amount)
            .bind(policy.premium_amount)
            .bind(policy.payment_frequency.as_str())
            .bind(policy.created_at)
            .bind(&policy.description)
            .bind(policy.is_active)
            .bind(policy.version)
            .fetch_one(&self.pool)
            .await
            .map_err(port_err)?;
        debug!(policy_id = %policy.id, policy_number = %policy.policy_number, "Inserted policy");
        row.try_into()
    }

    async fn update(&self, policy: Policy) -> Result<Policy, PortError> {
        let sql = format!(
            "UPDATE policies SET policy_number = $3, client_id = $4, policy_type = $5, status = $6, \
             start_date = $7, end_date = $8, coverage_amount = $9, premium_amount = $10, \
             payment_frequency = $11, description = $12, is_active = $13, version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(policy.id.as_uuid())
            .bind(policy.version)
            .bind(&policy.policy_number)
            .bind(policy.client_id.as_uuid())
            .bind(policy.policy_type.as_str())
            .bind(policy.status.as_str())
            .bind(policy.start_date)
            .bind(policy.end_date)
            .bind(policy.coverage_amount)
            .bind(policy.premium_amount)
            .bind(policy.payment_frequency.as_str())
            .bind(&policy.description)
            .bind(policy.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        match row {
            Some(row) => row.try_into(),
            None => Err(missing_or_stale(&self.pool, "policies", "Policy", *policy.id.as_uuid(), policy.version).await),
        }
    }

    async fn delete(&self, id: PolicyId) -> Result<bool, PortError> {
        let result = sqlx::query("DELETE FROM policies WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Policy>, PortError> {
        let (offset, limit) = bounds(page);
        let sql = format!("SELECT {COLUMNS} FROM policies ORDER BY created_at, policy_number OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        into_policies(rows)
    }

    async fn get_by_policy_number(&self, policy_number: &str) -> Result<Option<Policy>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM policies WHERE policy_number = $1");
        sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(policy_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?
            .map(Policy::try_from)
            .transpose()
    }

    async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Policy>, PortError> {
        let (offset, limit) = bounds(page);
        let sql = format!(
            "SELECT {COLUMNS} FROM policies WHERE client_id = $1 \
             ORDER BY created_at, policy_number OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(client_id.as_uuid())
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        into_policies(rows)
    }

    async fn get_active_policies(&self, page: Pagination) -> Result<Vec<Policy>, PortError> {
        let (offset, limit) = bounds(page);
        let sql = format!(
            "SELECT {COLUMNS} FROM policies WHERE status = $1 \
             ORDER BY created_at, policy_number OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(PolicyStatus::Active.as_str())
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        into_policies(rows)
    }
}
