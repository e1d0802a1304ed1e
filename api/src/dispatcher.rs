use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::{failure_message, DiagnosisError, GENERIC_AUTH_ERROR, GENERIC_DIAGNOSIS_ERROR};
use crate::transport::{HttpTransport, RawResponse, Transport};
use crate::types::{AdminStats, DiagnosisRequest, DiagnosisResult};

/// Sends requests to the scoring service and normalizes the outcome.
///
/// No caching and no retries. Concurrent submissions are not coordinated
/// here; callers that care about ordering use a request guard.
pub struct Dispatcher<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl Dispatcher<HttpTransport> {
    pub fn from_config(config: ClientConfig) -> Result<Self, DiagnosisError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { transport, config })
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn submit(&self, request: &DiagnosisRequest) -> Result<DiagnosisResult, DiagnosisError> {
        tracing::debug!(
            mode = %request.mode,
            has_url = request.url.is_some(),
            has_text = request.text.is_some(),
            "submitting diagnosis"
        );
        let body = serde_json::to_value(request)
            .map_err(|err| DiagnosisError::transport(None, err.to_string()))?;
        let response = self
            .transport
            .post_json(&self.config.analyze_path, &body)
            .await?;
        decode(response, GENERIC_DIAGNOSIS_ERROR)
    }

    pub async fn fetch_admin_stats(&self, password: &str) -> Result<AdminStats, DiagnosisError> {
        let body = json!({ "password": password.trim() });
        let response = self.transport.post_json(&self.config.admin_path, &body).await?;
        decode(response, GENERIC_AUTH_ERROR)
    }
}

fn decode<R: DeserializeOwned>(response: RawResponse, generic: &str) -> Result<R, DiagnosisError> {
    if !response.is_success() {
        let message = failure_message(&response.status_text, &response.body, generic);
        tracing::warn!(status = response.status, %message, "request rejected");
        return Err(DiagnosisError::transport(Some(response.status), message));
    }

    serde_json::from_slice(&response.body).map_err(|err| {
        tracing::warn!(%err, "unreadable success body");
        DiagnosisError::MalformedResponse(format!("unreadable response: {err}"))
    })
}
