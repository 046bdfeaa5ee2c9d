#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use ocean_cadastro::config::Config;
use ocean_cadastro::db::CadastroStorage;
use ocean_cadastro::{CadastroState, cadastro_router};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

static NEXT_DB: AtomicU64 = AtomicU64::new(0);

/// Router backed by a throwaway SQLite file, removed on drop.
pub struct TestApp {
    pub app: Router,
    pub storage: CadastroStorage,
    path: PathBuf,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body was not json")
    }

    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("response body was not utf-8")
    }

    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .expect("missing Location header")
            .to_str()
            .expect("Location header was not ascii")
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "ocean-cadastro-{}-{}-{}.sqlite",
            std::process::id(),
            nanos,
            NEXT_DB.fetch_add(1, Ordering::Relaxed)
        ));

        let database_url = format!("sqlite:{}", path.display());
        let storage = CadastroStorage::connect(&database_url)
            .await
            .expect("failed to open test database");

        let mut cfg = Config::default();
        cfg.basic.database_url = database_url;
        cfg.pagination.default_size = 20;
        cfg.pagination.max_size = 100;

        let app = cadastro_router(CadastroState::new(storage.clone(), cfg));
        Self { app, storage, path }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let resp = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn builder(method: &str, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "localhost")
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Self::builder("GET", uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(
            Self::builder("DELETE", uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send(
            Self::builder("POST", uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send_json("POST", uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send_json("PUT", uri, body).await
    }

    async fn send_json(&self, method: &str, uri: &str, body: &Value) -> TestResponse {
        self.send(
            Self::builder(method, uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Self::builder("POST", uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    /// POST and return the created resource's `data`.
    pub async fn create(&self, uri: &str, body: &Value) -> Value {
        let resp = self.post_json(uri, body).await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.text());
        resp.json()["data"].clone()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
