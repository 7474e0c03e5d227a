// src/config/mod.rs
// Runtime configuration, loaded once from the environment (and .env if present)

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AnalyzerError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    // ── Server
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub cors_origin: String,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Logging
    pub log_level: String,
}

// Values may carry trailing "# comments" and surrounding whitespace
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // .env is optional
        let _ = dotenvy::dotenv();

        Self {
            host: env_var_or("HOST", "0.0.0.0".to_string()),
            port: env_var_or("PORT", 5000),
            request_timeout_secs: env_var_or("REQUEST_TIMEOUT_SECS", 30),
            cors_origin: env_var_or("CORS_ORIGIN", "*".to_string()),
            database_url: env_var_or("DATABASE_URL", "sqlite://data.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            log_level: env_var_or("LOG_LEVEL", "info".to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tracing_level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(self.log_level.trim())
            .map_err(|_| AnalyzerError::Config(format!("unknown log level '{}'", self.log_level)))
    }

    /// Configured level, or INFO with the rejection when LOG_LEVEL is unusable
    pub fn tracing_level_or_default(&self) -> (tracing::Level, Option<AnalyzerError>) {
        match self.tracing_level() {
            Ok(level) => (level, None),
            Err(e) => (tracing::Level::INFO, Some(e)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 30,
            cors_origin: "*".to_string(),
            database_url: "sqlite://data.db".to_string(),
            sqlite_max_connections: 5,
            log_level: "info".to_string(),
        }
    }
}

pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
