//! HTTP seam. The dispatcher only sees `RawResponse`s, which keeps the
//! status/body interpretation testable without a network.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::{join_url, ClientConfig};
use crate::error::DiagnosisError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// POSTs a JSON body and hands back whatever came back. Only network-level
/// failures are errors here; non-2xx statuses are data.
#[async_trait(?Send)]
pub trait Transport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, DiagnosisError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, DiagnosisError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.timeout_secs));
        let client = builder
            .build()
            .map_err(|err| DiagnosisError::transport(None, err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, DiagnosisError> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                DiagnosisError::transport(err.status().map(|s| s.as_u16()), err.to_string())
            })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|err| DiagnosisError::transport(Some(status.as_u16()), err.to_string()))?
            .to_vec();

        Ok(RawResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
