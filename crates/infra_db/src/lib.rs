//! PostgreSQL Infrastructure
//!
//! sqlx adapters for the repository ports of the client, policy, claims,
//! billing and user domains, plus pool setup, embedded migrations and a
//! readiness probe.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PgClaimRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/insurance")).await?;
//! run_migrations(&pool).await?;
//! let claims: Arc<dyn ClaimRepository> = Arc::new(PgClaimRepository::new(pool.clone()));
//! ```

pub mod error;
pub mod health;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use health::PgHealthCheck;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{
    PgClaimRepository, PgClientRepository, PgPaymentRepository, PgPolicyRepository, PgUserRepository,
};
