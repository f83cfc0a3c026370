//! Configuration from flags, environment, and `.env`
//!
//! Precedence: command-line flag, then environment variable (a `.env`
//! file in the working directory is loaded into the environment first),
//! then the built-in default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;
use items_server::db::pool::{DEFAULT_DB_PORT, DEFAULT_MAX_CONNECTIONS};
use items_server::http::DEFAULT_PORT;
use items_server::{DbConfig, ServerConfig};

/// Database connection arguments shared by all commands
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Full connection URL (overrides the individual --db-* settings)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "items")]
    pub db_name: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_DB_PORT)]
    pub db_port: u16,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DbArgs {
    pub fn to_config(&self) -> DbConfig {
        DbConfig {
            url: self.database_url.clone(),
            user: self.db_user.clone(),
            host: self.db_host.clone(),
            database: self.db_name.clone(),
            password: self.db_password.clone(),
            port: self.db_port,
            max_connections: self.max_connections,
        }
    }
}

/// Listener arguments
#[derive(Args, Debug, Clone)]
pub struct ListenArgs {
    /// Address to listen on
    #[arg(long, env = "LISTEN_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ListenArgs {
    pub fn to_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: self.cors_permissive,
        }
    }
}
