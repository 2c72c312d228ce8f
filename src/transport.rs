//! HTTP transport
//!
//! The fetch pipeline only ever needs "send these bytes to this path and give
//! me the response bytes", so that is the whole [`Transport`] seam. The
//! production implementation is [`HttpTransport`] (reqwest, cookie auth);
//! tests plug in scripted transports.

use crate::config::ClientConfig;
use crate::error::{NotionError, Result};
use async_trait::async_trait;
pub use reqwest::Method;
use reqwest::{header, Client};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one request against `path` (relative to the API root) and return
    /// the response body.
    ///
    /// Non-success statuses map to [`NotionError::Api`], failures before a
    /// response to [`NotionError::Transport`].
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        (**self).send(method, path, body).await
    }
}

/// reqwest-backed transport with `token` cookie authentication.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = &self.token {
            request = request.header(header::COOKIE, format!("token={}", token));
        }
        if let Some(body) = body {
            tracing::trace!(%method, %url, body = %String::from_utf8_lossy(&body), "sending request");
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(
            %method,
            %url,
            status = status.as_u16(),
            bytes = bytes.len(),
            "api call finished"
        );

        if !status.is_success() {
            return Err(NotionError::api(
                status.as_u16(),
                url,
                &String::from_utf8_lossy(&bytes),
            ));
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let config = ClientConfig::default().with_base_url("http://localhost:9000/api/v3");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.url("loadPageChunk"),
            "http://localhost:9000/api/v3/loadPageChunk"
        );
        assert_eq!(
            transport.url("/getRecordValues"),
            "http://localhost:9000/api/v3/getRecordValues"
        );
    }
}
