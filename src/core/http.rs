//! HTTP transport for understat requests.

use crate::config::ClientConfig;
use crate::error::{Result, StatusError, UnderstatError};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A GET request issued by an endpoint.
///
/// Header names must be lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub params: Vec<(String, String)>,
    pub headers: Vec<(&'static str, &'static str)>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// A fully read response body with its status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub url: String,
    pub status: u16,
    pub reason: String,
    pub text: String,
}

impl Response {
    pub fn ok(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: 200,
            reason: "OK".to_string(),
            text: text.into(),
        }
    }

    /// Fail for 4xx and 5xx statuses.
    pub fn error_for_status(self) -> std::result::Result<Self, StatusError> {
        if self.status >= 400 {
            Err(StatusError::new(self.status, self.reason, self.url))
        } else {
            Ok(self)
        }
    }
}

/// The session every endpoint of one client shares.
///
/// `fetch` reports HTTP failures as a `Response` with an error status; only
/// connection-level failures are returned as `Err`.
pub trait Transport: Send + Sync {
    fn fetch(&self, request: &Request) -> impl Future<Output = Result<Response>> + Send;

    /// Store a cookie so that later requests send it.
    fn set_cookie(&self, name: &str, value: &str);

    /// Release the session. Later fetches fail with `SessionClosed`.
    fn close(&self);
}

/// `reqwest`-backed transport with a persistent cookie jar.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
    closed: AtomicBool,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/json"));
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        let base_url = Url::parse(&config.base_url).map_err(|e| UnderstatError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            jar,
            base_url,
            closed: AtomicBool::new(false),
        })
    }

    /// `Cookie` header the jar would send to the base URL.
    pub fn cookies(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, request: &Request) -> Result<Response> {
        if self.is_closed() {
            return Err(UnderstatError::SessionClosed);
        }

        let mut headers = HeaderMap::new();
        for &(name, value) in &request.headers {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }

        debug!(url = %request.url, "GET");
        let res = self
            .client
            .get(&request.url)
            .headers(headers)
            .query(&request.params)
            .send()
            .await?;

        let status = res.status();
        let url = res.url().to_string();
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        let text = res.text().await?;
        debug!(%url, status = status.as_u16(), bytes = text.len(), "response");

        Ok(Response {
            url,
            status: status.as_u16(),
            reason,
            text,
        })
    }

    fn set_cookie(&self, name: &str, value: &str) {
        self.jar
            .add_cookie_str(&format!("{}={}", name, value), &self.base_url);
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("HTTP session closed");
        }
    }
}
