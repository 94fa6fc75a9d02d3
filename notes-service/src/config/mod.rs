use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct NotesConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub url: Option<String>,
    /// Database holding the `note` collection.
    pub name: Option<String>,
    /// Upper bound for server selection and the startup ping.
    pub timeout_ms: u64,
}

impl DatabaseConfig {
    pub fn url_configured(&self) -> bool {
        self.url.is_some()
    }

    pub fn name_configured(&self) -> bool {
        self.name.is_some()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: None,
            timeout_ms: DEFAULT_DATABASE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// OpenTelemetry collector; spans stay local when unset.
    pub otlp_endpoint: Option<String>,
}

const DEFAULT_DATABASE_TIMEOUT_MS: u64 = 5000;

impl NotesConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(NotesConfig {
            common,
            database: DatabaseConfig {
                url: optional_env("DATABASE_URL"),
                name: optional_env("DATABASE_NAME"),
                timeout_ms: parse_env("DATABASE_TIMEOUT_MS", DEFAULT_DATABASE_TIMEOUT_MS)?,
            },
            telemetry: TelemetryConfig {
                log_level: optional_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            },
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}

/// Empty values count as unset; whitespace is a value.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, optional_env(key), default)
}

fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, value, e))
        }),
        None => Ok(default),
    }
}
