#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use showroom_api::config::{DatabaseConfig, DatabaseSource, ServerConfig};
use showroom_api::router::build_app_router;
use showroom_api::state::AppState;
use showroom_api::storage::ImageStore;

pub const SHELL_HTML: &str = "<!doctype html><title>Showroom</title><main id=\"product-grid\"></main>";

const BOUNDARY: &str = "showroom-test-boundary";

/// A router wired to throwaway upload and public directories.
///
/// The directories live as long as this value.
pub struct TestApp {
    pub router: Router,
    pub uploads: TempDir,
    pub public: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Names of the files currently in the upload directory.
    pub fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Build a test `ServerConfig` pointing at the given directories.
pub fn test_config(upload_dir: &Path, public_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        upload_dir: upload_dir.to_path_buf(),
        public_dir: public_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        database: DatabaseConfig {
            source: DatabaseSource::Url("postgres://localhost/showroom_test".to_string()),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(1),
        },
    }
}

/// Build the full application router, using the given pool (or none, for
/// degraded mode).
///
/// Goes through `build_app_router`, so integration tests exercise the same
/// middleware stack production uses.
pub fn build_test_app(pool: Option<PgPool>) -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let public = tempfile::tempdir().unwrap();
    std::fs::write(public.path().join("index.html"), SHELL_HTML).unwrap();
    std::fs::write(public.path().join("style.css"), "body { margin: 0; }").unwrap();

    let config = test_config(uploads.path(), public.path());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(ImageStore::new(uploads.path())),
    };

    TestApp {
        router: build_app_router(state, &config),
        uploads,
        public,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri).await
}

async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// One part of a `multipart/form-data` body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        data: &'a [u8],
    },
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// The standard text fields of the listing form.
pub fn listing_fields<'a>(name: &'a str, category: &'a str, price: &'a str) -> Vec<Part<'a>> {
    vec![
        Part::Text("name", name),
        Part::Text("category", category),
        Part::Text("condition", "Used"),
        Part::Text("price", price),
        Part::Text("desc", "Good as new"),
    ]
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
