//! Shared helpers for HTTP integration tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use strata_server::{AppState, GitHubSettings, ServerSettings, Settings, create_router};
use strata_store::strata_core::Format;
use strata_store::{ConfigStore, MemoryProvider};

/// Project pre-created in the test backend.
pub const PROJECT: &str = "myproject";

/// Builds an app over an in-memory backend with every format enabled.
pub fn app() -> TestClient {
    app_with_formats(Format::ALL.to_vec())
}

/// Builds an app whose deployment accepts only the given formats.
pub fn app_with_formats(supported_formats: Vec<Format>) -> TestClient {
    let provider = Arc::new(MemoryProvider::with_branches([PROJECT]));
    let store = Arc::new(ConfigStore::new(provider));
    let settings = Arc::new(Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        github: GitHubSettings {
            repo: "acme/configs".into(),
            token: "test-token".into(),
            api_base: "https://api.github.invalid".into(),
        },
        supported_formats,
    });

    TestClient::new(create_router(AppState::new(store, settings)))
}

/// Small helper around `tower::ServiceExt::oneshot`.
pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.request(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .uri(uri)
                .method("POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.request(
            Request::builder()
                .uri(uri)
                .method("PUT")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .uri(uri)
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        TestResponse::from_response(response).await
    }
}

/// Response wrapper with assertion helpers.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: Response<Body>) -> Self {
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes()
            .to_vec();

        Self { status, body }
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("body is not valid UTF-8")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("failed to parse JSON body: {e}: {}", self.text()))
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "expected status {} but got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }
}
