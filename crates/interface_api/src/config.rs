//! API configuration

use serde::Deserialize;

/// API configuration
///
/// Every field can be set from an `API_`-prefixed environment variable,
/// e.g. `API_JWT_SECRET`; unset fields keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration_secs: u64,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Pool size
    pub db_max_connections: u32,
    /// Default log filter; `RUST_LOG` takes precedence
    pub log_level: String,
    /// Username of the superuser created at startup
    pub admin_username: String,
    pub admin_email: String,
    /// No admin is created while this is unset
    pub admin_password: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 1800,
            database_url: "postgres://localhost/insurance".to_string(),
            db_max_connections: 10,
            log_level: "info".to_string(),
            admin_username: "admin".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
