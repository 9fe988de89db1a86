//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the router over a ticket
//! file in a temporary directory, so requests go through the real handlers
//! and the real JSON store without binding a socket.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use ticketdesk_core::{
    read_tickets, Config, JsonFileTicketStore, StorageBackend, StorageConfig, Ticket,
};
use ticketdesk_server::state::AppState;

/// Re-export fixtures for test convenience
pub use ticketdesk_core::testing::fixtures;

/// Test fixture for in-process API testing.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Path of the ticket data file
    pub data_path: PathBuf,
    /// Temporary directory holding the data file
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Body parsed as JSON, `Value::Null` when empty or not JSON
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestFixture {
    /// Create a fixture over the given seed tickets.
    pub async fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().join("data.json");
        std::fs::write(
            &data_path,
            serde_json::to_string(&tickets).expect("Failed to serialize seed"),
        )
        .expect("Failed to write seed file");

        let config = Config {
            storage: StorageConfig {
                backend: StorageBackend::Json,
                path: data_path.clone(),
            },
            ..Config::default()
        };

        let store = Arc::new(
            JsonFileTicketStore::open(&data_path).expect("Failed to open ticket store"),
        );
        let state = Arc::new(AppState::new(config, store));
        let router = ticketdesk_server::api::create_router(state);

        Self {
            router,
            data_path,
            temp_dir,
        }
    }

    /// Create a fixture with `n` default tickets.
    pub async fn new(n: usize) -> Self {
        Self::with_tickets(fixtures::tickets(n)).await
    }

    /// Tickets currently persisted in the data file.
    pub fn persisted(&self) -> Vec<Ticket> {
        read_tickets(&self.data_path).expect("Failed to read data file")
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a PUT request with raw string body (for testing malformed JSON).
    pub async fn put_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("PUT")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send an arbitrary prepared request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
