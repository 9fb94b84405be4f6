//! Configuration loader for the `reefwatch` binaries.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Every other module receives a [`Config`] (or its
//! [`DbConfig`] part) at construction and never reads the environment itself.
//!
use std::{env, net::SocketAddr, str::FromStr};

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::{ReefError, Result};

/// Parse an optional environment variable with a default value.
macro_rules! parse_env_or {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| parse_value::<$ty>($var_name, &v))
            .transpose()?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name).map_err(|_| {
            ReefError::Config(format!("{} must be set in .env or environment", $var_name))
        })?
    };
}

/// Default PostgreSQL port when `NEON_PORT` is unset.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default listen address for the dashboard.
pub const DEFAULT_DASHBOARD_ADDR: &str = "0.0.0.0:8080";

/// Connection parameters for the reef observation store.
///
/// Transport encryption is not configurable: [`DbConfig::connect_options`]
/// always requests `sslmode=require`.
#[derive(Clone)]
pub struct DbConfig {
    // ---
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Database connection parameters.
    pub db: DbConfig,

    /// Drop and recreate `reef_data` before generating (destroys all rows).
    pub schema_reset: bool,

    /// Fixed seed for the temperature noise source; entropy when `None`.
    pub seed: Option<u64>,

    /// Address the dashboard binds to.
    pub dashboard_addr: SocketAddr,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `NEON_HOST`, `NEON_DATABASE`, `NEON_USER`, `NEON_PASSWORD`
///
/// Optional:
/// - `NEON_PORT` – database port (default: 5432)
/// - `REEF_SCHEMA_RESET` – `true` to drop and recreate the table (default: false)
/// - `REEF_SEED` – u64 seed for reproducible generation (default: unset)
/// - `DASHBOARD_ADDR` – dashboard listen address (default: 0.0.0.0:8080)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let db = DbConfig {
        host: require_env!("NEON_HOST"),
        database: require_env!("NEON_DATABASE"),
        user: require_env!("NEON_USER"),
        password: require_env!("NEON_PASSWORD"),
        port: parse_env_or!("NEON_PORT", u16, DEFAULT_DB_PORT),
    };

    let schema_reset = match env::var("REEF_SCHEMA_RESET") {
        Ok(v) => parse_flag("REEF_SCHEMA_RESET", &v)?,
        Err(_) => false,
    };

    let seed = env::var("REEF_SEED")
        .ok()
        .map(|v| parse_value::<u64>("REEF_SEED", &v))
        .transpose()?;

    let dashboard_addr = dashboard_addr_from(env::var("DASHBOARD_ADDR").ok().as_deref())?;

    Ok(Config {
        db,
        schema_reset,
        seed,
        dashboard_addr,
    })
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ReefError::Config(format!("Invalid {}: {}", name, e)))
}

/// `DASHBOARD_ADDR` if given, else [`DEFAULT_DASHBOARD_ADDR`].
fn dashboard_addr_from(raw: Option<&str>) -> Result<SocketAddr> {
    parse_value::<SocketAddr>("DASHBOARD_ADDR", raw.unwrap_or(DEFAULT_DASHBOARD_ADDR))
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ReefError::Config(format!(
            "Invalid {}: expected true/false, got {:?}",
            name, other
        ))),
    }
}

impl DbConfig {
    /// Connect options with encrypted transport required.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
            .ssl_mode(PgSslMode::Require)
    }

    /// `user@host:port/database`, safe to log.
    pub fn display_target(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

// Keep the password out of `{:?}` output.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"****")
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the database password while showing every other value that
    /// was loaded.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  NEON_HOST         : {}", self.db.host);
        tracing::info!("  NEON_DATABASE     : {}", self.db.database);
        tracing::info!("  NEON_USER         : {}", self.db.user);
        tracing::info!("  NEON_PASSWORD     : ****");
        tracing::info!("  NEON_PORT         : {}", self.db.port);
        tracing::info!("  sslmode           : require");
        tracing::info!("  REEF_SCHEMA_RESET : {}", self.schema_reset);
        tracing::info!(
            "  REEF_SEED         : {}",
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "<entropy>".to_string())
        );
        tracing::info!("  DASHBOARD_ADDR    : {}", self.dashboard_addr);
    }
}
