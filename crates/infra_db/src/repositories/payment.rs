//! Payment table adapter

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use core_kernel::{ClaimId, ClientId, DomainPort, Pagination, PaymentId, PolicyId, PortError};
use domain_billing::{Payment, PaymentRepository};

use super::{bounds, missing_or_stale, parse_label};
use crate::error::port_err;

const COLUMNS: &str = "id, payment_number, client_id, policy_id, claim_id, amount, payment_date, \
                       due_date, status, payment_type, payment_method, description, created_at, \
                       is_active, version";

#[derive(Debug, FromRow)]
struct PaymentRow {
    id: Uuid,
    payment_number: String,
    client_id: Uuid,
    policy_id: Option<Uuid>,
    claim_id: Option<Uuid>,
    amount: Decimal,
    payment_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    status: String,
    payment_type: String,
    payment_method: Option<String>,
    description: String,
    created_at: NaiveDate,
    is_active: bool,
    version: i64,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = PortError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            payment_number: row.payment_number,
            client_id: ClientId::from_uuid(row.client_id),
            policy_id: row.policy_id.map(PolicyId::from_uuid),
            claim_id: row.claim_id.map(ClaimId::from_uuid),
            amount: row.amount,
            payment_date: row.payment_date,
            due_date: row.due_date,
            status: parse_label("payments", &row.status)?,
            payment_type: parse_label("payments", &row.payment_type)?,
            payment_method: row.payment_method,
            description: row.description,
            created_at: row.created_at,
            is_active: row.is_active,
            version: row.version,
        })
    }
}

/// `PaymentRepository` over the `payments` table
#[derive(Debug, Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn page_by(&self, column: &'static str, id: Uuid, page: Pagination) -> Result<Vec<Payment>, PortError> {
        let (offset, limit) = bounds(page);
        let sql = format!(
            "SELECT {COLUMNS} FROM payments WHERE {column} = $1 \
             ORDER BY created_at, payment_number OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(id)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        rows.into_iter().map(Payment::try_from).collect()
    }
}

impl DomainPort for PgPaymentRepository {}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?
            .map(Payment::try_from)
            .transpose()
    }

    async fn create(&self, payment: Payment) -> Result<Payment, PortError> {
        let sql = format!(
            "INSERT INTO payments ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(payment.id.as_uuid())
            .bind(&payment.payment_number)
            .bind(payment.client_id.as_uuid())
            .bind(payment.policy_id.map(|id| *id.as_uuid()))
            .bind(payment.claim_id.map(|id| *id.as_uuid()))
            .bind(payment.amount)
            .bind(payment.payment_date)
            .bind(payment.due_date)
            .bind(payment.status.as_str())
            .bind(payment.payment_type.as_str())
            .bind(payment.payment_method.as_deref())
            .bind(&payment.description)
            .bind(payment.created_at)
            .bind(payment.is_active)
            .bind(payment.version)
            .fetch_one(&self.pool)
            .await
            .map_err(port_err)?;
        debug!(payment_id = %payment.id, payment_number = %payment.payment_number, "Inserted payment");
        row.try_into()
    }

    async fn update(&self, payment: Payment) -> Result<Payment, PortError> {
        let sql = format!(
            "UPDATE payments SET payment_number = $3, client_id = $4, policy_id = $5, claim_id = $6, \
             amount = $7, payment_date = $8, due_date = $9, status = $10, payment_type = $11, \
             payment_method = $12, description = $13, is_active = $14, version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(payment.id.as_uuid())
            .bind(payment.version)
            .bind(&payment.payment_number)
            .bind(payment.client_id.as_uuid())
            .bind(payment.policy_id.map(|id| *id.as_uuid()))
            .bind(payment.claim_id.map(|id| *id.as_uuid()))
            .bind(payment.amount)
            .bind(payment.payment_date)
            .bind(payment.due_date)
            .bind(payment.status.as_str())
            .bind(payment.payment_type.as_str())
            .bind(payment.payment_method.as_deref())
            .bind(&payment.description)
            .bind(payment.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        match row {
            Some(row) => row.try_into(),
            None => Err(missing_or_stale(&self.pool, "payments", "Payment", *payment.id.as_uuid(), payment.version).await),
        }
    }

    async fn delete(&self, id: PaymentId) -> Result<bool, PortError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Payment>, PortError> {
        let (offset, limit) = bounds(page);
        let sql = format!("SELECT {COLUMNS} FROM payments ORDER BY created_at, payment_number OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn get_by_payment_number(&self, payment_number: &str) -> Result<Option<Payment>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM payments WHERE payment_number = $1");
        sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(payment_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?
            .map(Payment::try_from)
            .transpose()
    }

    async fn get_by_client_id(&self, client_id: ClientId, page: Pagination) -> Result<Vec<Payment>, PortError> {
        self.page_by("client_id", *client_id.as_uuid(), page).await
    }

    async fn get_by_policy_id(&self, policy_id: PolicyId, page: Pagination) -> Result<Vec<Payment>, PortError> {
        self.page_by("policy_id", *policy_id.as_uuid(), page).await
    }

    async fn get_by_claim_id(&self, claim_id: ClaimId, page: Pagination) -> Result<Vec<Payment>, PortError> {
        self.page_by("claim_id", *claim_id.as_uuid(), page).await
    }
}
