//! Shared test harness: app construction, a mock media store, and
//! HTTP-level request helpers driven through `tower::ServiceExt::oneshot`.

#![allow(dead_code)] // Not every integration test uses every helper.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use cliphub_api::auth::jwt::JwtConfig;
use cliphub_api::config::ServerConfig;
use cliphub_api::routes;
use cliphub_api::state::AppState;
use cliphub_storage::{AssetKind, MediaStore, RemoteAsset, StagedFile, StorageError};

/// Build a test `ServerConfig` with safe defaults and the given staging
/// root.
pub fn test_config(staging_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        staging_dir,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// A programmable in-memory [`MediaStore`].
///
/// Honors the uploader contract (the staged file is removed on every
/// path) and records each attempt so tests can assert what was tried.
pub struct MockMediaStore {
    /// Kinds whose uploads should fail with a rejection.
    failing: Mutex<HashMap<AssetKind, bool>>,
    /// Every upload attempt, in order, with the locator it returned.
    pub uploads: Mutex<Vec<(AssetKind, Result<String, String>)>>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self {
            failing: Mutex::new(HashMap::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// Make uploads of `kind` fail from now on.
    pub fn fail_kind(&self, kind: AssetKind) {
        self.failing.lock().unwrap().insert(kind, true);
    }

    /// Number of upload attempts seen so far.
    pub fn attempt_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// Locator returned for the nth successful upload attempt.
    pub fn locator(&self, index: usize) -> Option<String> {
        self.uploads
            .lock()
            .unwrap()
            .get(index)
            .and_then(|(_, r)| r.as_ref().ok().cloned())
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(
        &self,
        staged: StagedFile,
        kind: AssetKind,
    ) -> Result<RemoteAsset, StorageError> {
        // Contract: the staged copy is consumed whatever the outcome.
        let _ = tokio::fs::remove_file(&staged.path).await;

        let should_fail = *self.failing.lock().unwrap().get(&kind).unwrap_or(&false);
        let mut uploads = self.uploads.lock().unwrap();
        if should_fail {
            uploads.push((kind, Err("rejected".to_string())));
            return Err(StorageError::Rejected(500));
        }

        let secure_url = format!("https://cdn.test/{}/{}", kind.as_str(), uploads.len() + 1);
        uploads.push((kind, Ok(secure_url.clone())));
        Ok(RemoteAsset { secure_url, kind })
    }
}

/// Build the full application router with all middleware layers, using
/// the given pool and media store.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool, media_store: Arc<dyn MediaStore>, staging_dir: PathBuf) -> Router {
    let config = test_config(staging_dir);

    let state = AppState {
        pool,
        config: Arc::new(config),
        media_store,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a bodyless POST with a Bearer token.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

/// One part of a hand-built multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

const BOUNDARY: &str = "cliphub-test-boundary";

/// Build a multipart/form-data body from the given parts.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Send a multipart POST with a Bearer token.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[Part<'_>],
    token: &str,
) -> Response {
    let (content_type, body) = multipart_body(parts);
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user via the API and log them in, returning
/// `(user_id, access_token, refresh_token)`.
pub async fn register_and_login(app: Router, username: &str) -> (i64, String, String) {
    let password = "test_password_123!";
    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        serde_json::json!({
            "username": username,
            "email": format!("{username}@test.com"),
            "password": password,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    (
        json["user"]["id"].as_i64().unwrap(),
        json["access_token"].as_str().unwrap().to_string(),
        json["refresh_token"].as_str().unwrap().to_string(),
    )
}
