#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use vowreel_api::auth::jwt::{generate_access_token, JwtConfig};
use vowreel_api::config::{
    ServerConfig, StorageBackend, DEFAULT_HOMEPAGE_HIGHLIGHT_LIMIT, DEFAULT_UPLOAD_BODY_LIMIT_BYTES,
};
use vowreel_api::router::build_app_router;
use vowreel_api::state::AppState;
use vowreel_core::upload::DEFAULT_MAX_UPLOAD_BYTES;
use vowreel_events::RevalidationBus;
use vowreel_storage::{AssetUploader, InMemoryObjectStore};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const PUBLIC_BASE_URL: &str = "https://cdn.vowreel.test";

/// Build a test `ServerConfig` with in-memory storage and a known secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        upload_body_limit_bytes: DEFAULT_UPLOAD_BODY_LIMIT_BYTES,
        homepage_highlight_limit: DEFAULT_HOMEPAGE_HIGHLIGHT_LIMIT,
        revalidate_webhook_url: None,
        revalidate_secret: None,
        storage: StorageBackend::Memory,
        public_base_url: PUBLIC_BASE_URL.to_string(),
    }
}

/// Router plus handles on the in-process collaborators it was built with.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryObjectStore>,
    pub revalidation: Arc<RevalidationBus>,
}

/// Build the production router over `pool`, an in-memory object store and
/// a fresh revalidation bus.
pub fn spawn_app(pool: PgPool) -> TestApp {
    let config = test_config();
    let store = Arc::new(InMemoryObjectStore::new());
    let revalidation = Arc::new(RevalidationBus::default());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploader: Arc::new(AssetUploader::new(
            store.clone(),
            config.public_base_url.clone(),
            config.max_upload_bytes,
        )),
        revalidation: Arc::clone(&revalidation),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        revalidation,
    }
}

pub fn build_test_app(pool: PgPool) -> Router {
    spawn_app(pool).router
}

/// Pool that never connects, for routes that do not touch the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap()
}

/// A valid admin bearer token.
pub fn admin_token() -> String {
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
    };
    generate_access_token("admin-user", Some("studio@vowreel.test"), 15, &config).unwrap()
}

fn authorized(builder: axum::http::request::Builder) -> axum::http::request::Builder {
    builder.header(AUTHORIZATION, format!("Bearer {}", admin_token()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Authenticated GET.
pub async fn admin_get(app: Router, uri: &str) -> Response {
    let request = authorized(Request::builder().uri(uri))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(app: Router, method: Method, uri: &str, body: &Value) -> Response {
    let request = authorized(Request::builder().method(method).uri(uri))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Authenticated POST with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response {
    json_request(app, Method::POST, uri, body).await
}

/// Authenticated PUT with a JSON body.
pub async fn put_json(app: Router, uri: &str, body: &Value) -> Response {
    json_request(app, Method::PUT, uri, body).await
}

/// Authenticated POST without a body (toggles).
pub async fn post_empty(app: Router, uri: &str) -> Response {
    let request = authorized(Request::builder().method(Method::POST).uri(uri))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Authenticated DELETE.
pub async fn delete(app: Router, uri: &str) -> Response {
    let request = authorized(Request::builder().method(Method::DELETE).uri(uri))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "vowreel-test-boundary";

/// One part of a `multipart/form-data` body.
pub enum Part<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn image_part(file_name: &str, size: usize) -> Part<'_> {
    Part::File {
        name: "file",
        file_name,
        content_type: "image/jpeg",
        bytes: vec![0xFF; size],
    }
}

pub fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Authenticated multipart POST.
pub async fn post_multipart(app: Router, uri: &str, parts: Vec<Part<'_>>) -> Response {
    let request = authorized(Request::builder().method(Method::POST).uri(uri))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}
