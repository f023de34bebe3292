// Common test utilities and helper structs
// Shared across all test files to avoid duplication

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use registry_backend::{
    app_config::{
        AppConfig, DatabaseConfig, Environment, JwtConfig, SecurityConfig, ServerConfig,
        StoreBackend,
    },
    build_router,
    services::jwt::{JwtConfig as TokenConfig, JwtService},
    AppState, Company, CompanyStatus, CredentialStore, MemoryStore, SESSION_COOKIE,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-with-32-plus-chars";
pub const TEST_PASSWORD: &str = "Secr3t!pass";

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            environment: Environment::Test,
            rust_log: "warn".to_string(),
        },
        store_backend: StoreBackend::Memory,
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: 1,
            idle_timeout: 1,
            max_lifetime: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        security: SecurityConfig {
            bcrypt_cost: 4,
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            cookie_domain: "localhost".to_string(),
        },
        disable_embedded_migrations: true,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub jwt_service: Arc<JwtService>,
}

impl TestApp {
    /// Send a POST request
    pub fn post(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(self, "POST", uri)
    }

    /// Send a GET request
    pub fn get(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(self, "GET", uri)
    }

    /// Send a PUT request
    pub fn put(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(self, "PUT", uri)
    }

    /// Send a DELETE request
    pub fn delete(&self, uri: &str) -> TestRequest<'_> {
        TestRequest::new(self, "DELETE", uri)
    }

    /// Register a company through the API and return its session token
    pub async fn register(&self, user_name: &str, rfc: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&registration_body(user_name, rfc))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response
            .session_cookie()
            .expect("registration sets the session cookie")
    }

    /// Operator step: mark a company as verified
    pub async fn set_status(&self, user_name: &str, status: CompanyStatus) -> Company {
        let company = self
            .store
            .find_company_by_user_name(user_name)
            .await
            .unwrap()
            .expect("company exists");
        self.store
            .update_company_status(company.id, status)
            .await
            .unwrap()
    }

    /// Register, activate and log in; returns the login session token
    pub async fn active_company(&self, user_name: &str, rfc: &str) -> String {
        self.register(user_name, rfc).await;
        self.set_status(user_name, CompanyStatus::Active).await;

        let response = self
            .post("/api/auth/login")
            .json(&json!({ "user_name": user_name, "password": TEST_PASSWORD }))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        response.session_cookie().expect("login sets the session cookie")
    }
}

pub fn registration_body(user_name: &str, rfc: &str) -> Value {
    json!({
        "legal_name": "Acme SA de CV",
        "name": "Acme",
        "password": TEST_PASSWORD,
        "rfc": rfc,
        "user_name": user_name,
    })
}

/// Test request builder
pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: &'static str,
    uri: String,
    body: Option<Vec<u8>>,
    cookie: Option<String>,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: &'static str, uri: &str) -> Self {
        Self {
            app,
            method,
            uri: uri.to_string(),
            body: None,
            cookie: None,
        }
    }

    /// Add JSON body to request
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_vec(body).unwrap());
        self
    }

    /// Send a raw body labelled as JSON
    pub fn raw_json(mut self, body: &str) -> Self {
        self.body = Some(body.as_bytes().to_vec());
        self
    }

    /// Attach the session cookie
    pub fn session(mut self, token: &str) -> Self {
        self.cookie = Some(format!("{}={}", SESSION_COOKIE, token));
        self
    }

    /// Send the request
    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(&self.uri);

        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match self.body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.app.clone().oneshot(request).await.unwrap();

        TestResponse { response }
    }
}

/// Test response wrapper
pub struct TestResponse {
    response: Response<Body>,
}

impl TestResponse {
    /// Get status code
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Raw Set-Cookie header for the session cookie
    pub fn set_cookie_header(&self) -> Option<String> {
        self.response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{}=", SESSION_COOKIE)))
            .map(String::from)
    }

    /// Value of the session cookie set by this response
    pub fn session_cookie(&self) -> Option<String> {
        let header = self.set_cookie_header()?;
        let pair = header.split(';').next()?;
        let (_, value) = pair.split_once('=')?;
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Parse JSON response
    pub async fn json(self) -> Value {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// Get response body as text
    pub async fn text(self) -> String {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }
}

/// Setup test application backed by the in-memory store
pub fn setup_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let jwt_service = JwtService::new(TokenConfig::from_secret(TEST_SECRET).unwrap());

    let state = AppState::new(config, store.clone(), jwt_service);
    let jwt_service = state.jwt_service.clone();

    TestApp {
        app: build_router(state),
        store,
        jwt_service,
    }
}
