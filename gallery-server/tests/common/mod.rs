//! Shared harness: seeded in-memory database, manual clock and the full
//! middleware stack, driven with `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use gallery_server::api::build_app;
use gallery_server::auth::ManualClock;
use gallery_server::db::{DbService, seed};
use gallery_server::permission::MemoryPermissionCache;
use gallery_server::{Config, ServerState};

pub const SUPERUSER: &str = seed::SEED_USERNAME;
pub const SUPERUSER_PASSWORD: &str = seed::SEED_PASSWORD;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = Config::for_tests();
        let db = DbService::new(&config.database_url).await.unwrap();
        seed::seed_if_empty(&db.pool).await.unwrap();

        // Token expiry is checked against wall time, so start from now
        let clock = Arc::new(ManualClock::starting_now());
        let state = ServerState::new(
            config,
            db.pool,
            clock.clone(),
            Arc::new(MemoryPermissionCache::new()),
        );
        let app = build_app(state.clone());

        Self { app, state, clock }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(method, uri, Some(token), Some(body)).await
    }

    pub async fn login_with_device(
        &self,
        user: &str,
        password: &str,
        device: Value,
    ) -> (StatusCode, Value) {
        let body = json!({ "user": user, "password": password, "device": device });
        self.request(Method::POST, "/api/v1/auth/login", None, Some(body))
            .await
    }

    pub async fn login(&self, user: &str, password: &str) -> (StatusCode, Value) {
        self.login_with_device(user, password, json!({})).await
    }

    /// Log in and return the access token, panics on failure
    pub async fn token(&self, user: &str, password: &str) -> String {
        let (status, body) = self.login(user, password).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn superuser_token(&self) -> String {
        self.token(SUPERUSER, SUPERUSER_PASSWORD).await
    }

    pub async fn privilege_id(&self, code: &str) -> i64 {
        let (id,): (i64,) = sqlx::query_as("SELECT id FROM privilege WHERE code = ?")
            .bind(code)
            .fetch_one(&self.state.pool)
            .await
            .unwrap();
        id
    }

    pub async fn account_id(&self, username: &str) -> i64 {
        let (id,): (i64,) = sqlx::query_as("SELECT id FROM account WHERE username = ?")
            .bind(username)
            .fetch_one(&self.state.pool)
            .await
            .unwrap();
        id
    }

    pub async fn fingerprint(&self, account_id: i64) -> Option<String> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT session_id FROM account_session WHERE account_id = ?")
                .bind(account_id)
                .fetch_optional(&self.state.pool)
                .await
                .unwrap();
        row.map(|(session_id,)| session_id)
    }

    /// Create a role through the API and return its id
    pub async fn create_role(&self, token: &str, name: &str, codes: &[&str]) -> i64 {
        let mut actions = Vec::new();
        for code in codes {
            actions.push(json!({ "privilege_id": self.privilege_id(code).await }));
        }
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/user/access",
                token,
                json!({ "name": name, "description": "test role", "actions": actions }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create role failed: {body}");
        body["id"].as_i64().unwrap()
    }

    /// Create an account through the API and return its id
    pub async fn create_account(
        &self,
        token: &str,
        access_id: i64,
        username: &str,
        password: &str,
    ) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/user",
                token,
                json!({
                    "access_id": access_id,
                    "username": username,
                    "password": password,
                    "fullname": format!("{username} tester"),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create account failed: {body}");
        body["id"].as_i64().unwrap()
    }
}
