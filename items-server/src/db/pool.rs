//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool connects
//! lazily, so the server can start while the database is still down.

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Connection parameters.
///
/// `url` takes precedence over the individual parts when set.
#[derive(Clone)]
pub struct DbConfig {
    pub url: Option<String>,
    pub user: String,
    pub host: String,
    pub database: String,
    pub password: Option<String>,
    pub port: u16,
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: "postgres".to_string(),
            host: "localhost".to_string(),
            database: "items".to_string(),
            password: None,
            port: DEFAULT_DB_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

// Credentials are never printed.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .field("host", &self.host)
            .field("database", &self.database)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DbConfig {
    /// Build sqlx connect options from the URL or the individual parts.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is set but cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        Ok(match &self.password {
            Some(password) => options.password(password),
            None => options,
        })
    }

    /// Human-readable target for log lines (no credentials).
    pub fn target(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!("{}@{}:{}/{}", self.user, self.host, self.port, self.database),
        }
    }
}

/// Create a PostgreSQL connection pool.
///
/// No connection is opened until the first query.
///
/// # Errors
///
/// Returns an error if the connection options are invalid.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::default())?;
/// ```
pub fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    let options = config.connect_options()?;
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(options))
}

/// Round-trip a trivial query and return the database server's clock.
pub async fn probe(pool: &PgPool) -> Result<DateTime<Utc>, sqlx::Error> {
    sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
        .fetch_one(pool)
        .await
}
