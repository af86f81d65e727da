//! Catalog transport trait and implementations.
//!
//! All backend traffic goes through [`CatalogTransport`] so the engine
//! can be exercised against a mock in tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::EngageError;

/// Trait for the backend catalog, enabling mockability in tests.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, EngageError>;

    async fn post(&self, path: &str, body: Value) -> Result<Value, EngageError>;

    async fn put(&self, path: &str, body: Value) -> Result<Value, EngageError>;

    async fn delete(&self, path: &str) -> Result<Value, EngageError>;
}

/// Configuration for HttpCatalog.
#[derive(Clone)]
pub struct HttpCatalogBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    bearer_token: Option<String>,
}

impl HttpCatalogBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            user_agent: "potluck/1.0".to_string(),
            bearer_token: None,
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Set the bearer credential attached to every request. None sends
    /// requests unauthenticated; the server rejects what it must.
    pub fn bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn build(self) -> Result<HttpCatalog, EngageError> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(HttpCatalog {
            inner,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            bearer_token: self.bearer_token,
        })
    }
}

/// Production transport backed by reqwest.
pub struct HttpCatalog {
    inner: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpCatalog {
    pub fn builder(base_url: impl Into<String>) -> HttpCatalogBuilder {
        HttpCatalogBuilder::new(base_url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.inner.request(method, url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<Value, EngageError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            tracing::debug!(%status, "catalog rejected credential");
            return Err(EngageError::Unauthenticated);
        }
        if !status.is_success() {
            tracing::debug!(%status, "catalog request failed");
            return Err(EngageError::Remote(format!("HTTP {}", status)));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            // Confirmation-only responses (e.g. deletes) have no body.
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| EngageError::Decode(format!("Invalid JSON in response: {}", e)))
    }
}

#[async_trait]
impl CatalogTransport for HttpCatalog {
    async fn get(&self, path: &str) -> Result<Value, EngageError> {
        self.dispatch(self.request(reqwest::Method::GET, path)).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, EngageError> {
        self.dispatch(self.request(reqwest::Method::POST, path).json(&body))
            .await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, EngageError> {
        self.dispatch(self.request(reqwest::Method::PUT, path).json(&body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<Value, EngageError> {
        self.dispatch(self.request(reqwest::Method::DELETE, path))
            .await
    }
}

/// Mock reply for testing.
#[derive(Clone)]
pub enum MockReply {
    Json(Value),
    Error(String),
    Unauthenticated,
}

/// Mock catalog for testing. Routes are keyed by "METHOD /path" and every
/// dispatched request is recorded so tests can assert which calls (if
/// any) reached the network.
#[derive(Default)]
pub struct MockCatalog {
    routes: HashMap<String, MockReply>,
    served: Mutex<Vec<String>>,
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reply for a method + path.
    pub fn with_reply(mut self, method: &str, path: &str, reply: MockReply) -> Self {
        self.routes.insert(format!("{} {}", method, path), reply);
        self
    }

    /// Add a JSON reply for a method + path.
    pub fn with_json(self, method: &str, path: &str, value: Value) -> Self {
        self.with_reply(method, path, MockReply::Json(value))
    }

    /// Add a remote-failure reply for a method + path.
    pub fn with_error(self, method: &str, path: &str, error: &str) -> Self {
        self.with_reply(method, path, MockReply::Error(error.to_string()))
    }

    /// Add a credential-rejection reply for a method + path.
    pub fn with_unauthenticated(self, method: &str, path: &str) -> Self {
        self.with_reply(method, path, MockReply::Unauthenticated)
    }

    /// Keys of every request dispatched so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.served.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.served.lock().unwrap().len()
    }

    fn reply(&self, key: String) -> Result<Value, EngageError> {
        self.served.lock().unwrap().push(key.clone());
        match self.routes.get(&key) {
            Some(MockReply::Json(value)) => Ok(value.clone()),
            Some(MockReply::Error(e)) => Err(EngageError::Remote(e.clone())),
            Some(MockReply::Unauthenticated) => Err(EngageError::Unauthenticated),
            None => Err(EngageError::Remote(format!("No mock route for {}", key))),
        }
    }
}

#[async_trait]
impl CatalogTransport for MockCatalog {
    async fn get(&self, path: &str) -> Result<Value, EngageError> {
        self.reply(format!("GET {}", path))
    }

    async fn post(&self, path: &str, _body: Value) -> Result<Value, EngageError> {
        self.reply(format!("POST {}", path))
    }

    async fn put(&self, path: &str, _body: Value) -> Result<Value, EngageError> {
        self.reply(format!("PUT {}", path))
    }

    async fn delete(&self, path: &str) -> Result<Value, EngageError> {
        self.reply(format!("DELETE {}", path))
    }
}
