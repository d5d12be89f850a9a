//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use toolcrib_api::{AppState, build_app};
use toolcrib_core::config::{AppConfig, DatabaseConfig};
use toolcrib_database::store::{InventoryStore, MemoryInventoryStore};
use toolcrib_service::Seeder;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store behind the router, for direct inspection
    pub store: Arc<dyn InventoryStore>,
    /// Application config
    pub config: AppConfig,
}

/// Parsed response from the test router
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body (`Null` when not JSON)
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `id` inside `data`.
    pub fn id(&self) -> i64 {
        self.data()["id"].as_i64().expect("response data has an id")
    }
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub async fn new() -> Self {
        let config = AppConfig {
            database: DatabaseConfig::memory(),
            ..AppConfig::default()
        };
        let store: Arc<dyn InventoryStore> = Arc::new(MemoryInventoryStore::new());
        let router = build_app(AppState::new(config.clone(), Arc::clone(&store)));

        Self {
            router,
            store,
            config,
        }
    }

    /// Create a test application holding the demo inventory
    pub async fn seeded() -> Self {
        let app = Self::new().await;
        Seeder::new(Arc::clone(&app.store))
            .seed_if_empty()
            .await
            .expect("Failed to seed");
        app
    }

    /// Send a request through the router
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a user through the API and return its id
    pub async fn create_user(&self, username: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/users",
                Some(json!({ "username": username, "full_name": "Test User" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.id()
    }

    /// Register a tool through the API and return its id
    pub async fn create_tool(&self, serial_number: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/tools",
                Some(json!({
                    "name": format!("Tool {serial_number}"),
                    "serial_number": serial_number,
                    "location": "Main Store",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.id()
    }

    /// Check a tool out through the API
    pub async fn checkout(&self, user_id: i64, tool_id: i64, due_date: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/checkouts",
            Some(json!({
                "user_id": user_id,
                "tool_id": tool_id,
                "project_location": "Rig 4",
                "due_date": due_date,
            })),
        )
        .await
    }
}
