//! Database primitives: settings, the shared connection handle and the
//! document operations on the `employees` collection.

use std::{str::FromStr, sync::Arc, time::Duration};

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;

mod employees;

pub use employees::EmployeeStore;

/// Shared connection handle. Built once by the binary and passed around.
pub type DbPool = Arc<DatabaseConnection>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (set {0})")]
    MissingUrl(String),
    #[error("document {0} already exists")]
    Conflict(String),
    #[error("document {0} not found")]
    NotFound(String),
    #[error("no id left after {0}")]
    IdsExhausted(i64),
    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 8;

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
    url: Option<String>,
    max_connections: u32,
    connect_timeout: Duration,
    sqlx_logging: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new("DATABASE_URL")
    }
}

impl DatabaseSettings {
    /// Settings that resolve the URL from `env_key` at connect time.
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            sqlx_logging: false,
        }
    }

    /// Settings with a fixed URL, ignoring the environment.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self {
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS).max(1),
            connect_timeout: Duration::from_secs(env_or(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            sqlx_logging: env_or("DATABASE_SQLX_LOGGING", false),
            ..Self::default()
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn database_url(&self) -> DbResult<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Open the long-lived connection handle described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(settings.max_connections)
        .connect_timeout(settings.connect_timeout)
        .sqlx_logging(settings.sqlx_logging);
    let conn = Database::connect(options).await?;
    info!(
        backend = ?conn.get_database_backend(),
        max_connections = settings.max_connections,
        "database connection established"
    );
    Ok(Arc::new(conn))
}
