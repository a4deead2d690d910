#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Creating a test Salvo service backed by a fresh in-memory store
//! - Seeding users and issuing access tokens
//! - Making HTTP requests
//! - Asserting on responses
//!
//! ## Isolation
//! Each test builds its own `TestApp`, so tests share no store state and can
//! run in parallel.

use std::sync::Arc;

use salvo::http::header::HeaderName;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};
use serde::Serialize;

use openmensa_test::component::auth::{Authorizer, casbin::init_casbin};
use openmensa_test::component::config::Settings;
use openmensa_test::component::handler::{CasbinEnforcerHandler, ConfigHandler, StoreHandler};
use openmensa_test::component::model::user::{NewUser, User};
use openmensa_test::component::store::{Repository, UserStore, memory::MemoryStore};
use openmensa_test::component::token::issue_token;

pub use openmensa_test::component::constants::USERS_ROUTE_PREFIX;
pub use tracing;

/// Test configuration - static struct instead of loading from file.
fn test_config() -> Settings {
    let mut settings = Settings::default();
    settings.logging.level = "debug".to_string();
    settings
}

/// Path of the users collection in the given format.
#[must_use]
pub fn users_path(format: &str) -> String {
    format!("{USERS_ROUTE_PREFIX}.{format}")
}

/// Path of a single user in the given format.
#[must_use]
pub fn user_path(id: uuid::Uuid, format: &str) -> String {
    format!("{USERS_ROUTE_PREFIX}/{id}.{format}")
}

/// A service wired like `main.rs`, plus direct access to its store.
pub struct TestApp {
    pub store: MemoryStore,
    pub authorizer: Authorizer,
    pub service: Service,
}

impl TestApp {
    /// ## Summary
    /// Creates a service with an empty store and the default ability policy.
    ///
    /// ## Panics
    /// Panics if the enforcer cannot be created.
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let enforcer = Arc::new(
            init_casbin()
                .await
                .expect("Failed to initialize Casbin enforcer for tests"),
        );

        let shared: Arc<dyn Repository> = Arc::new(store.clone());
        let router = Router::new()
            .hoop(StoreHandler { store: shared })
            .hoop(ConfigHandler {
                settings: Arc::new(test_config()),
            })
            .hoop(CasbinEnforcerHandler {
                enforcer: enforcer.clone(),
            })
            .push(openmensa_test::app::api::routes());

        Self {
            store,
            authorizer: Authorizer::new(enforcer),
            service: Service::new(router),
        }
    }

    /// Inserts a regular user, or an administrator if `admin` is set.
    #[must_use]
    pub fn seed_user(&self, login: &str, admin: bool) -> User {
        self.store
            .insert_user(NewUser {
                login: login.to_string(),
                email: Some(format!("{login}@example.org")),
                name: login.to_string(),
                time_zone: "Berlin".to_string(),
                language: "en".to_string(),
                admin,
            })
            .expect("Failed to seed user")
    }

    /// Issues a non-expiring token and returns its secret.
    #[must_use]
    pub fn token_for(&self, user: &User) -> String {
        issue_token(&self.store, user, None, None, None)
            .expect("Failed to issue token")
            .secret
    }

    /// Seeds a user and returns it together with a token secret.
    #[must_use]
    pub fn login(&self, login: &str, admin: bool) -> (User, String) {
        let user = self.seed_user(login, admin);
        let token = self.token_for(&user);
        (user, token)
    }

    #[must_use]
    pub fn find_user(&self, id: uuid::Uuid) -> Option<User> {
        self.store.find_user(id).expect("Failed to read store")
    }
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    /// Creates a new test request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(path: &str) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {token}"))
    }

    /// Sets the Content-Type header.
    #[must_use]
    pub fn content_type(self, content_type: &str) -> Self {
        self.header("Content-Type", content_type)
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json_body(self, value: &serde_json::Value) -> Self {
        self.content_type("application/json; charset=utf-8")
            .body(serde_json::to_vec(value).expect("JSON body should encode"))
    }

    /// Sets an XML request body.
    #[must_use]
    pub fn xml_body(self, xml: &str) -> Self {
        self.content_type("application/xml; charset=utf-8")
            .body(xml.as_bytes().to_vec())
    }

    /// Sets a MessagePack request body.
    #[must_use]
    pub fn msgpack_body(self, value: &impl Serialize) -> Self {
        self.content_type("application/msgpack")
            .body(rmp_serde::to_vec_named(value).expect("MessagePack body should encode"))
    }

    /// Sends the request to the test service and returns the response.
    pub async fn send(self, app: &TestApp) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "POST" => TestClient::post(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body_bytes) = self.body {
            client = client.body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(&app.service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}:\n{}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Asserts that a header exists with the expected value.
    #[must_use]
    pub fn assert_header(self, name: &str, expected: &str) -> Self {
        let value = self
            .get_header(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found in response"));
        assert_eq!(
            value, expected,
            "Header '{name}' expected '{expected}' but got '{value}'"
        );
        self
    }

    /// Asserts that a header contains the expected substring.
    #[must_use]
    pub fn assert_header_contains(self, name: &str, expected: &str) -> Self {
        let value = self
            .get_header(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found in response"));
        assert!(
            value.contains(expected),
            "Header '{name}' expected to contain '{expected}' but got '{value}'"
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = self.body_string();
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    /// Asserts that the response body is empty.
    #[must_use]
    pub fn assert_body_empty(self) -> Self {
        assert!(
            self.body.is_empty(),
            "Expected empty body but got {} bytes",
            self.body.len()
        );
        self
    }

    /// Returns the body as a UTF-8 string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("Expected JSON body ({e}) but got:\n{}", self.body_string()))
    }

    /// Parses the body as MessagePack.
    #[must_use]
    pub fn msgpack(&self) -> serde_json::Value {
        rmp_serde::from_slice(&self.body).expect("Expected MessagePack body")
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
