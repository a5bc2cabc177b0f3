//! Shared helpers for HTTP tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;

use trellis_api::{AppState, build_app};
use trellis_auth::{AccessReviewer, Claims, RoleStore};
use trellis_core::config::AppConfig;
use trellis_database::MemoryStore;
use trellis_entity::group::ROOT_GROUP_ID;

const ROLES: &str = include_str!("roles.yaml");
const SECRET: &str = "http-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory store backing the reviewer
    pub store: Arc<MemoryStore>,
    pub group: i64,
    pub application: i64,
    pub cluster: i64,
}

/// Captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application over a fresh group → application → cluster tree
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = SECRET.to_string();
        config.auth.jwt_leeway_seconds = 0;

        let store = Arc::new(MemoryStore::new());
        let group = store.create_group("group", ROOT_GROUP_ID).unwrap().id;
        let application = store.create_application("application", group).unwrap().id;
        let cluster = store.create_cluster("cluster", application).unwrap().id;

        let roles = Arc::new(RoleStore::from_yaml_str(ROLES).unwrap());
        let reviewer = Arc::new(
            AccessReviewer::from_config(&config.rbac, roles, store.clone(), store.clone())
                .unwrap(),
        );

        let config = Arc::new(config);
        let router = build_app(AppState::new(config.clone(), reviewer), &config.server.cors);

        Self {
            router,
            store,
            group,
            application,
            cluster,
        }
    }

    /// Issue a bearer token for a user.
    pub fn token(&self, user_id: i64, admin: bool) -> String {
        self.token_with_secret(user_id, admin, SECRET)
    }

    pub fn token_with_secret(&self, user_id: i64, admin: bool, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            name: format!("user-{user_id}"),
            admin,
            iat: now,
            exp: now + 600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
