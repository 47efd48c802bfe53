//! User table adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use core_kernel::{DomainPort, Pagination, PortError, UserId};
use domain_user::{User, UserRepository};

use super::{bounds, missing_or_stale};
use crate::error::port_err;

const COLUMNS: &str = "id, username, email, full_name, password_hash, is_active, is_superuser, \
                       roles, created_at, version";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    full_name: String,
    password_hash: String,
    is_active: bool,
    is_superuser: bool,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
    version: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            password_hash: row.password_hash,
            is_active: row.is_active,
            is_superuser: row.is_superuser,
            roles: row.roles,
            created_at: row.created_at,
            version: row.version,
        }
    }
}

/// `UserRepository` over the `users` table
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgUserRepository {}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(row.map(User::from))
    }

    async fn create(&self, user: User) -> Result<User, PortError> {
        let sql = format!(
            "INSERT INTO users ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id.as_uuid())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.is_superuser)
            .bind(&user.roles)
            .bind(user.created_at)
            .bind(user.version)
            .fetch_one(&self.pool)
            .await
            .map_err(port_err)?;
        debug!(user_id = %user.id, username = %user.username, "Inserted user");
        Ok(row.into())
    }

    async fn update(&self, user: User) -> Result<User, PortError> {
        let sql = format!(
            "UPDATE users SET username = $3, email = $4, full_name = $5, password_hash = $6, \
             is_active = $7, is_superuser = $8, roles = $9, version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id.as_uuid())
            .bind(user.version)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.is_superuser)
            .bind(&user.roles)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        match row {
            Some(row) => Ok(row.into()),
            None => Err(missing_or_stale(&self.pool, "users", "User", *user.id.as_uuid(), user.version).await),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, PortError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<User>, PortError> {
        let (offset, limit) = bounds(page);
        let sql = format!("SELECT {COLUMNS} FROM users ORDER BY created_at, username OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(row.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(port_err)?;
        Ok(row.map(User::from))
    }
}
