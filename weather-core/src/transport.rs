use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

pub mod http;

pub use http::ReqwestTransport;

/// Settings applied to every outgoing request.
///
/// Replaced as a whole via `WeatherClient::set_transport_options`; fields are
/// never merged with a previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Total request timeout. `None` means no client-side limit.
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    /// Proxy URL used for all schemes, e.g. `http://127.0.0.1:8080`.
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
    /// Replaces `https://restapi.amap.com` in every endpoint URL.
    pub base_url: Option<String>,
}

impl TransportOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Failure reported by an [`HttpTransport`]: network errors, timeouts and
/// non-success HTTP statuses.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    status: Option<u16>,
    #[source]
    source: Option<reqwest::Error>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: None, source: None }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self { message: message.into(), status: Some(status), source: None }
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
            source: Some(err),
        }
    }
}

/// The single network seam of the client: one GET returning the body text.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        options: &TransportOptions,
    ) -> Result<String, TransportError>;
}
