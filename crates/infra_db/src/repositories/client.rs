//! Client table adapter

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use core_kernel::{ClientId, DomainPort, Pagination, PortError};
use domain_client::{Client, ClientRepository};

use super::{bounds, contains_pattern, missing_or_stale};
use crate::error::port_err;

const COLUMNS: &str = "id, first_name, last_name, email, phone, birth_date, address, \
                       passport_number, created_at, is_active, version";

#[derive(Debug, FromRow)]
struct ClientRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    birth_date: Option<NaiveDate>,
    address: String,
    passport_number: String,
    created_at: NaiveDate,
    is_active: bool,
    version: i64,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: ClientId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
            address: row.address,
            passport_number: row.passport_number,
            created_at: row.created_at,
            is_active: row.is_active,
            version: row.version,
        }
    }
}

/// `ClientRepository` over the `clients` table
#[derive(Debug, Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, sql: &str, filter: Option<String>, page: Pagination) -> Result<Vec<Client>, PortError> {
        let (offset, limit) = bounds(page);
        let mut query = sqlx::query_as::<_, ClientRow>(sql);
        if let Some(value) = filter {
            query = query.bind(value);
        }
        let rows = query
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }
}

impl DomainPort for PgClientRepository {}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(row.map(Client::from))
    }

    async fn create(&self, client: Client) -> Result<Client, PortError> {
        let sql = format!(
            "INSERT INTO clients ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(client.id.as_uuid())
            .bind(&client.first_name)
            .bind(&client.last_name)
            .bind(&client.email)
            .bind(&client.phone)
            .bind(client.birth_date)
            .bind(&client.address)
            .bind(&client.passport_number)
            .bind(client.created_at)
            .bind(client.is_active)
            .bind(client.version)
            .fetch_one(&self.pool)
            .await
            .map_err(port_err)?;
        debug!(client_id = %client.id, "Inserted client");
        Ok(row.into())
    }

    async fn update(&self, client: Client) -> Result<Client, PortError> {
        let sql = format!(
            "UPDATE clients SET first_name = $3, last_name = $4, email = $5, phone = $6, \
             birth_date = $7, address = $8, passport_number = $9, is_active = $10, \
             version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(client.id.as_uuid())
            .bind(client.version)
            .bind(&client.first_name)
            .bind(&client.last_name)
            .bind(&client.email)
            .bind(&client.phone)
            .bind(client.birth_date)
            .bind(&client.address)
            .bind(&client.passport_number)
            .bind(client.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        match row {
            Some(row) => Ok(row.into()),
            None => Err(missing_or_stale(&self.pool, "clients", "Client", *client.id.as_uuid(), client.version).await),
        }
    }

    async fn delete(&self, id: ClientId) -> Result<bool, PortError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Client>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM clients ORDER BY created_at, id OFFSET $1 LIMIT $2");
        self.fetch_many(&sql, None, page).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Client>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM clients WHERE email = $1");
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(row.map(Client::from))
    }

    async fn search_by_name(&self, name: &str, page: Pagination) -> Result<Vec<Client>, PortError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM clients WHERE first_name ILIKE $1 OR last_name ILIKE $1 \
             ORDER BY created_at, id OFFSET $2 LIMIT $3"
        );
        let pattern = contains_pattern(name);
        self.fetch_many(&sql, Some(pattern), page).await
    }
}
