#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use notes_service::config::{DatabaseConfig, NotesConfig, TelemetryConfig};
use notes_service::services::DocumentStore;
use notes_service::startup::Application;
use notes_service::{build_router, AppState};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use tower::util::ServiceExt;
use uuid::Uuid;

pub fn test_config(url: Option<&str>, name: Option<&str>) -> NotesConfig {
    NotesConfig {
        common: CoreConfig { port: 0 },
        database: DatabaseConfig {
            url: url.map(str::to_string),
            name: name.map(str::to_string),
            timeout_ms: 2000,
        },
        telemetry: TelemetryConfig {
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
    }
}

/// Router backed by a store that never connected.
pub fn offline_router(url: Option<&str>, name: Option<&str>) -> Router {
    build_router(AppState {
        config: test_config(url, name),
        store: DocumentStore::unavailable("DATABASE_URL or DATABASE_NAME not set"),
    })
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .oneshot(request)
        .await
        .expect("Failed to execute request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Running service against a real MongoDB (`TEST_DATABASE_URL`, default
/// localhost) with a throwaway database.
pub struct TestApp {
    pub address: String,
    pub store: DocumentStore,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("notes_test_{}", Uuid::new_v4().simple());

        let app = Application::build(test_config(Some(&url), Some(&db_name)))
            .await
            .expect("Failed to build test application");
        assert!(
            app.store().is_initialized(),
            "MongoDB is not reachable at {}",
            url
        );

        let store = app.store().clone();
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            store,
            client,
        }
    }

    pub async fn create_note(&self, body: Value) -> String {
        let response = self
            .client
            .post(format!("{}/notes", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["id"].as_str().expect("id is not a string").to_string()
    }

    pub async fn list_notes(&self, query: &str) -> Vec<Value> {
        let response = self
            .client
            .get(format!("{}/notes{}", self.address, query))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 200);
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn cleanup(&self) {
        if let Some(db) = self.store.database() {
            let _ = db.drop(None).await;
        }
    }
}
