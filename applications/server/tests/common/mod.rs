//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use mixtape_core::{CreateTrack, CreateUser, StorageContext, Track, User};
use mixtape_server::{create_router, services::AuthService, state::AppState};
use mixtape_storage::LocalStorageContext;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// A fully wired application over a throwaway SQLite file
pub struct TestApp {
    pub router: Router,
    pub db: Arc<LocalStorageContext>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let url = format!("sqlite://{}", db_path.display());

        let pool = mixtape_storage::create_pool(&url)
            .await
            .expect("Failed to create pool");
        mixtape_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(LocalStorageContext::new(pool));
        let auth_service = Arc::new(AuthService::new(
            "test-secret-key".to_string(),
            1, // 1 hour access
            1, // 1 day refresh
        ));

        let app_state = AppState::new(db.clone(), Arc::clone(&auth_service));

        Self {
            router: create_router(app_state),
            db,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Service layer over the same store, for tests that skip HTTP
    pub fn state(&self) -> AppState {
        AppState::new(self.db.clone(), Arc::clone(&self.auth_service))
    }

    /// Create a user and return it with a valid access token
    pub async fn user(&self, name: &str, is_admin: bool) -> (User, String) {
        let user = self
            .db
            .create_user(CreateUser {
                name: name.to_string(),
                is_admin,
            })
            .await
            .expect("Failed to create user");
        let token = self
            .auth_service
            .create_access_token(&user.id, is_admin)
            .expect("Failed to create token");
        (user, token)
    }

    pub async fn track(&self, name: &str) -> Track {
        self.db
            .create_track(CreateTrack {
                name: name.to_string(),
                artist: "Test Artist".to_string(),
                album: "Test Album".to_string(),
                img: "https://img.example/cover.png".to_string(),
                duration: "3:30".to_string(),
            })
            .await
            .expect("Failed to create track")
    }

    /// Send a request and decode the JSON response body
    pub async fn send(
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

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "TestPassword123!";

    pub const ADMIN_USERNAME: &str = "admin";
    pub const ADMIN_PASSWORD: &str = "AdminPassword456!";
}
