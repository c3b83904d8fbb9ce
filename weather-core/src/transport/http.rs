use async_trait::async_trait;
use reqwest::{Client, Proxy};
use std::sync::{Mutex, PoisonError};

use super::{HttpTransport, TransportError, TransportOptions};

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default transport backed by `reqwest`.
///
/// The `reqwest::Client` is kept together with the options it was built
/// from and rebuilt only when a call passes different options.
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    cached: Mutex<Option<(TransportOptions, Client)>>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn client_for(&self, options: &TransportOptions) -> Result<Client, TransportError> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((_, client)) = cached.as_ref().filter(|(built_for, _)| built_for == options) {
            return Ok(client.clone());
        }

        tracing::debug!("building HTTP client for new transport options");
        let client = Self::build_client(options)?;
        *cached = Some((options.clone(), client.clone()));
        Ok(client)
    }

    #[cfg(test)]
    fn cached_options(&self) -> Option<TransportOptions> {
        let cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        cached.as_ref().map(|(options, _)| options.clone())
    }

    fn build_client(options: &TransportOptions) -> Result<Client, TransportError> {
        let mut builder = Client::builder()
            .user_agent(options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = options.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(proxy) = options.proxy.as_deref() {
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        options: &TransportOptions,
    ) -> Result<String, TransportError> {
        let client = self.client_for(options)?;

        let res = client.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(TransportError::with_status(
                format!("GET {url} failed with status {status}: {}", truncate_body(&body)),
                status.as_u16(),
            ));
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
