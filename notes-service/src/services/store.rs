//! Document store adapter over MongoDB.
//!
//! The handle is resolved once at startup. When the database is not
//! configured or not reachable the store is kept in an unavailable state and
//! every operation fails with [`StoreError::Unavailable`] instead of aborting
//! startup.

use crate::config::DatabaseConfig;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, DateTime as BsonDateTime, Document},
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Database,
};
use serde::Serialize;
use service_core::error::AppError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.")]
    Unavailable,

    #[error(transparent)]
    OperationFailed(#[from] mongodb::error::Error),

    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] bson::ser::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(_) => AppError::InternalError(anyhow::Error::new(err)),
            _ => AppError::DatabaseError(anyhow::Error::new(err)),
        }
    }
}

#[derive(Clone)]
enum Handle {
    Connected { client: MongoClient, db: Database },
    Unavailable { reason: String },
}

#[derive(Clone)]
pub struct DocumentStore {
    handle: Handle,
}

impl DocumentStore {
    /// Resolve the store from configuration. Never fails; problems leave the
    /// store unavailable and are logged.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let (url, name) = match (&config.url, &config.name) {
            (Some(url), Some(name)) => (url, name),
            _ => {
                tracing::warn!(
                    url_set = config.url_configured(),
                    name_set = config.name_configured(),
                    "Database is not configured; notes endpoints will be unavailable"
                );
                return Self::unavailable("DATABASE_URL or DATABASE_NAME not set");
            }
        };

        let timeout = Duration::from_millis(config.timeout_ms);
        let mut options = match ClientOptions::parse(url).await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("Invalid DATABASE_URL: {}", e);
                return Self::unavailable(format!("invalid DATABASE_URL: {}", e));
            }
        };
        options.app_name = Some("notes-service".to_string());
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = match MongoClient::with_options(options) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to create MongoDB client: {}", e);
                return Self::unavailable(e.to_string());
            }
        };

        let store = Self {
            handle: Handle::Connected {
                db: client.database(name),
                client,
            },
        };

        match store.ping().await {
            Ok(()) => {
                tracing::info!(database = %name, "Successfully connected to MongoDB database");
                store
            }
            Err(e) => {
                tracing::warn!(database = %name, "MongoDB is unreachable: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            handle: Handle::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.handle, Handle::Connected { .. })
    }

    /// Why the store is unavailable, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.handle {
            Handle::Unavailable { reason } => Some(reason),
            Handle::Connected { .. } => None,
        }
    }

    pub fn database(&self) -> Option<&Database> {
        match &self.handle {
            Handle::Connected { db, .. } => Some(db),
            Handle::Unavailable { .. } => None,
        }
    }

    pub fn database_name(&self) -> Option<&str> {
        self.database().map(|db| db.name())
    }

    fn db(&self) -> Result<&Database, StoreError> {
        self.database().ok_or(StoreError::Unavailable)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        match &self.handle {
            Handle::Connected { client, .. } => {
                client
                    .database("admin")
                    .run_command(doc! { "ping": 1 }, None)
                    .await?;
                Ok(())
            }
            Handle::Unavailable { .. } => Err(StoreError::Unavailable),
        }
    }

    /// Insert `payload` into collection `kind`, stamping `created_at` and
    /// `updated_at`. Returns the new document id.
    pub async fn create_document<T: Serialize>(
        &self,
        kind: &str,
        payload: &T,
    ) -> Result<String, StoreError> {
        let db = self.db()?;

        let mut document = bson::to_document(payload)?;
        let now = BsonDateTime::now();
        document.insert("created_at", now);
        document.insert("updated_at", now);

        let result = db
            .collection::<Document>(kind)
            .insert_one(document, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %kind, "Failed to insert document: {}", e);
                e
            })?;

        Ok(id_to_string(&result.inserted_id))
    }

    /// Fetch at most `limit` documents of `kind` matching `filter`.
    ///
    /// A non-positive limit yields no documents.
    pub async fn get_documents(
        &self,
        kind: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let db = self.db()?;

        let Some(limit) = query_limit(limit) else {
            return Ok(Vec::new());
        };

        let find_options = FindOptions::builder().limit(limit).build();

        let cursor = db
            .collection::<Document>(kind)
            .find(filter, find_options)
            .await
            .map_err(|e| {
                tracing::error!(collection = %kind, "Failed to query documents: {}", e);
                e
            })?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(|e| {
            tracing::error!(collection = %kind, "Failed to collect documents: {}", e);
            e
        })?;

        Ok(documents)
    }

    pub async fn list_collection_names(&self, max: usize) -> Result<Vec<String>, StoreError> {
        let mut names = self.db()?.list_collection_names(None).await?;
        names.truncate(max);
        Ok(names)
    }

    pub async fn close(self) {
        if let Handle::Connected { db, .. } = self.handle {
            tracing::info!(database = %db.name(), "Closing MongoDB connection");
        }
    }
}

/// Driver limit for a requested count; `None` when nothing should be fetched.
///
/// The driver reads 0 as "unbounded" and negative values as "single batch of
/// |n|", so only positive counts are passed through.
pub fn query_limit(requested: i64) -> Option<i64> {
    (requested > 0).then_some(requested)
}

/// String form of a document id: ObjectIds as hex, strings as-is.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[derive(Serialize)]
    struct Payload {
        text: String,
    }

    #[tokio::test]
    async fn missing_configuration_leaves_store_unavailable() {
        let store = DocumentStore::connect(&DatabaseConfig::default()).await;

        assert!(!store.is_initialized());
        assert!(store.database_name().is_none());
        assert!(store.unavailable_reason().is_some());
    }

    #[tokio::test]
    async fn malformed_url_leaves_store_unavailable() {
        let config = DatabaseConfig {
            url: Some("not-a-mongodb-url".to_string()),
            name: Some("notes".to_string()),
            ..DatabaseConfig::default()
        };

        let store = DocumentStore::connect(&config).await;

        assert!(!store.is_initialized());
        assert!(store
            .unavailable_reason()
            .is_some_and(|r| r.contains("invalid DATABASE_URL")));
    }

    #[tokio::test]
    async fn operations_on_unavailable_store_fail() {
        let store = DocumentStore::unavailable("test");
        let payload = Payload {
            text: "hello".to_string(),
        };

        assert!(matches!(
            store.create_document("note", &payload).await,
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(
            store.get_documents("note", doc! {}, 10).await,
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(
            store.list_collection_names(10).await,
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable)));
    }

    #[test]
    fn unavailable_maps_to_database_error_with_message() {
        let err = AppError::from(StoreError::Unavailable);
        match err {
            AppError::DatabaseError(inner) => {
                assert!(inner.to_string().starts_with("Database not available"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn only_positive_limits_reach_the_driver() {
        assert_eq!(query_limit(100), Some(100));
        assert_eq!(query_limit(1), Some(1));
        assert_eq!(query_limit(0), None);
        assert_eq!(query_limit(-5), None);
        assert_eq!(query_limit(i64::MIN), None);
    }

    #[test]
    fn ids_render_as_strings() {
        let oid = ObjectId::new();
        assert_eq!(id_to_string(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(id_to_string(&Bson::String("abc".to_string())), "abc");
        assert_eq!(id_to_string(&Bson::Int32(7)), "7");
    }
}
