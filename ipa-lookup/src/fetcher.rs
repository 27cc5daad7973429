//! HTTP fetching
//!
//! Strategies talk to the network only through the [`Fetcher`] trait.
//! [`HttpFetcher`] is the production implementation on `reqwest`;
//! [`StaticFetcher`] serves canned responses for tests and offline use.

use crate::error::FetchError;
use async_trait::async_trait;
use ipa_common::config::HttpConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Outgoing GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Append a query parameter (sent URL-encoded, in insertion order)
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// URL with the query parameters appended, unencoded
    ///
    /// Used as a stable key for logging and for [`StaticFetcher`] routes.
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, query)
    }
}

/// Successful (2xx) response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_str(&self.body)
            .map_err(|e| FetchError::Decode(format!("Invalid JSON body: {}", e)))
    }
}

/// Blocking-free GET transport consumed by the source strategies
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a GET request
    ///
    /// # Errors
    /// Non-2xx statuses are reported as [`FetchError::Status`], so an `Ok`
    /// always carries a usable body.
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

/// Production fetcher backed by a shared `reqwest::Client`
pub struct HttpFetcher {
    http_client: Client,
}

impl HttpFetcher {
    /// Create fetcher with per-request timeout and default User-Agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        Self::new(Duration::from_secs(config.timeout_secs), &config.user_agent)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        debug!(target_url = %request.target(), "HTTP GET");

        let mut builder = self.http_client.get(&request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        // Request headers take precedence over the client's default User-Agent
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// In-memory fetcher keyed by [`FetchRequest::target`]
///
/// Unrouted requests fail with a 404 status. Every request is recorded so
/// tests can assert on what was (and was not) fetched.
#[derive(Default)]
pub struct StaticFetcher {
    routes: HashMap<String, Result<FetchResponse, FetchError>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 for `target`
    pub fn with_body(mut self, target: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes
            .insert(target.into(), Ok(FetchResponse::ok(body)));
        self
    }

    /// Fail requests for `target` with `error`
    pub fn with_failure(mut self, target: impl Into<String>, error: FetchError) -> Self {
        self.routes.insert(target.into(), Err(error));
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Targets of all requests received so far, in order
    pub fn targets(&self) -> Vec<String> {
        self.requests().iter().map(FetchRequest::target).collect()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let target = request.target();
        match self.routes.get(&target) {
            Some(result) => result.clone(),
            None => Err(FetchError::Status {
                status: 404,
                url: target,
            }),
        }
    }
}
