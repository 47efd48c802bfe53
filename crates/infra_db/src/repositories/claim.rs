//! Claim table adapter

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use core_kernel::{ClaimId, ClientId, DomainPort, Pagination, PolicyId, PortError};
use domain_claims::{Claim, ClaimRepository};

use super::{bounds, missing_or_stale, parse_label};
use crate::error::port_err;

const COLUMNS: &str = "id, claim_number, policy_id, client_id, incident_date, report_date, \
                       description, status, claim_amount, approved_amount, created_at, \
                       updated_at, is_active, version";

#[derive(Debug, FromRow)]
struct ClaimRow {
    id: Uuid,
    claim_number: String,
    policy_id: Option<Uuid>,
    client_id: Option<Uuid>,
    incident_date: Option<NaiveDate>,
    report_date: NaiveDate,
    description: String,
    status: String,
    claim_amount: Decimal,
    approved_amount: Option<Decimal>,
    created_at: NaiveDate,
    updated_at: NaiveDate,
    is_active: bool,
    version: i64,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = PortError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        Ok(Claim {
            id: ClaimId::from_uuid(row.id),
            claim_number: row.claim_number,
            policy_id: row.policy_id.map(PolicyId::from_uuid),
            client_id: row.client_id.map(ClientId::from_uuid),
            incident_date: row.incident_date,
            report_date: row.report_date,
            description: row.description,
            status: parse_label("claims", &row.status)?,
            claim_amount: row.claim_amount,
            approved_amount: row.approved_amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_active: row.is_active,
            version: row.version,
        })
    }
}

/// `ClaimRepository` over the `claims` table
#[derive(Debug, Clone)]
pub struct PgClaimRepository {
    pool: PgPool,
}

impl PgClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Page of claims whose `column` equals `id`
    async fn page_by(&self, column: &'static str, id: Uuid, page: Pagination) -> Result<Vec<Claim>, PortError> {
        let (offset, limit) = bounds(page);
        let sql = format!(
            "SELECT {COLUMNS} FROM claims WHERE {column} = $1 \
             ORDER BY created_at, claim_number OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        rows.into_iter().map(Claim::try_from).collect()
    }
}

impl DomainPort for PgClaimRepository {}

#[async_trait]
impl ClaimRepository for PgClaimRepository {
    async fn get_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM claims WHERE id = $1");
        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?
            .map(Claim::try_from)
            .transpose()
    }

    async fn create(&self, claim: Claim) -> Result<Claim, PortError> {
        let sql = format!(
            "INSERT INTO claims ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim.id.as_uuid())
            .bind(&claim.claim_number)
            .bind(claim.policy_id.map(|id| *id.as_uuid()))
            .bind(claim.client_id.map(|id| *id.as_uuid()))
            .bind(claim.incident_date)
            .bind(claim.report_date)
            .bind(&claim.description)
            .bind(claim.status.as_str())
            .bind(claim.claim_amount)
            .bind(claim.approved_amount)
            .bind(claim.created_at)
            .bind(claim.updated_at)
            .bind(claim.is_active)
            .bind(claim.version)
            .fetch_one(&self.pool)
            .await
            .map_err(port_err)?;
        debug!(claim_id = %claim.id, claim_number = %claim.claim_number, "Inserted claim");
        row.try_into()
    }

    async fn update(&self, claim: Claim) -> Result<Claim, PortError> {
        let sql = format!(
            "UPDATE claims SET claim_number = $3, policy_id = $4, client_id = $5, \
             incident_date = $6, report_date = $7, description = $8, status = $9, \
             claim_amount = $10, approved_amount = $11, updated_at = $12, is_active = $13, \
             version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim.id.as_uuid())
            .bind(claim.version)
            .bind(&claim.claim_number)
            .bind(claim.policy_id.map(|id| *id.as_uuid()))
            .bind(claim.client_id.map(|id| *id.as_uuid()))
            .bind(claim.incident_date)
            .bind(claim.report_date)
            .bind(&claim.description)
            .bind(claim.status.as_str())
            .bind(claim.claim_amount)
            .bind(claim.approved_amount)
            .bind(claim.updated_at)
            .bind(claim.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        match row {
            Some(row) => row.try_into(),
            None => Err(missing_or_stale(&self.pool, "claims", "Claim", *claim.id.as_uuid(), claim.version).await),
        }
    }

    async fn delete(&self, id: ClaimId) -> Result<bool, PortError> {
        let result = sqlx::query("DELETE FROM claims WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Claim>, PortError> {
        let (offset, limit) = bounds(page);
        let sql = format!("SELECT {COLUMNS} FROM claims ORDER BY created_at, claim_number OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        rows.into_iter().map(Claim::try_from).collect()
    }

    async fn get_by_claim_number(&self, claim_number: &str) -> Result<Option<Claim>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM claims WHERE claim_number = $1");
        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?
            .map(Claim::try_from)
            .transpose()
    }

    async fn get_by_policy_id(&self, policy_id: PolicyId, page: Pagination) -> Result<Vec<Claim>, PortError> {
        self.page_by("policy_id", *policy_id.as_uuid(), page).await
    }

    async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Claim>, PortError> {
        self.page_by("client_id", *client_id.as_uuid(), page).await
    }
}
