//! Database connectivity probe backing `GET /test`.

use crate::config::DatabaseConfig;
use crate::services::DocumentStore;
use serde::Serialize;

pub const MAX_COLLECTIONS: usize = 10;
pub const MAX_ERROR_CHARS: usize = 50;

/// What the probe learned about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAvailability {
    /// Handle present and collections enumerable.
    Available { collections: Vec<String> },
    /// No handle was established at startup.
    Unavailable(String),
    /// Handle present but enumeration failed.
    Error(String),
}

impl StoreAvailability {
    pub async fn check(store: &DocumentStore) -> Self {
        if !store.is_initialized() {
            let reason = store.unavailable_reason().unwrap_or_default().to_string();
            tracing::debug!(reason = %reason, "Store not initialized");
            return StoreAvailability::Unavailable(reason);
        }

        match store.list_collection_names(MAX_COLLECTIONS).await {
            Ok(collections) => StoreAvailability::Available { collections },
            Err(e) => {
                tracing::warn!("Probe failed to list collections: {}", e);
                StoreAvailability::Error(e.to_string())
            }
        }
    }

    fn database_status(&self) -> String {
        match self {
            StoreAvailability::Available { .. } => "✅ Connected & Working".to_string(),
            StoreAvailability::Unavailable(_) => "⚠️  Available but not initialized".to_string(),
            StoreAvailability::Error(message) => format!(
                "⚠️  Connected but Error: {}",
                truncate_chars(message, MAX_ERROR_CHARS)
            ),
        }
    }

    fn connection_status(&self) -> &'static str {
        match self {
            StoreAvailability::Unavailable(_) => "Not Connected",
            _ => "Connected",
        }
    }
}

/// Body of `GET /test`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProbeReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl ProbeReport {
    pub fn new(availability: &StoreAvailability, config: &DatabaseConfig) -> Self {
        let collections = match availability {
            StoreAvailability::Available { collections } => {
                collections.iter().take(MAX_COLLECTIONS).cloned().collect()
            }
            _ => Vec::new(),
        };

        Self {
            backend: "✅ Running".to_string(),
            database: availability.database_status(),
            database_url: set_status(config.url_configured()),
            database_name: set_status(config.name_configured()),
            connection_status: availability.connection_status().to_string(),
            collections,
        }
    }
}

fn set_status(configured: bool) -> String {
    let status = if configured { "✅ Set" } else { "❌ Not Set" };
    status.to_string()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
