use std::str::FromStr;

use anyhow::{Context, Result};

use crate::dedup::classify::{DEFAULT_ANALYZE_THRESHOLD, DEFAULT_DUPLICATE_THRESHOLD};
use crate::dedup::{DedupConfig, DEFAULT_LOOKBACK_DAYS};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub dedup: DedupConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let dedup = DedupConfig::new(
            env_or("DEDUP_DUPLICATE_THRESHOLD", DEFAULT_DUPLICATE_THRESHOLD)?,
            env_or("DEDUP_ANALYZE_THRESHOLD", DEFAULT_ANALYZE_THRESHOLD)?,
            env_or("DEDUP_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS)?,
        )?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            dedup,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(key, std::env::var(key).ok().as_deref(), default)
}

/// Parses `raw` if present and non-blank, otherwise returns `default`.
fn parse_or<T>(key: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
    }
}
