use super::SummaryClient;
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::runtime::{Builder, Handle};
use url::Url;

const LOG_TARGET: &str = "   summary";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// A [`SummaryClient`] that talks to an Ollama-compatible `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct HttpSummaryClient {
    client: Arc<reqwest::Client>,
    endpoint: Url,
    model: String,
    timeout: Duration,
}

impl HttpSummaryClient {
    /// Create a client for `model` served at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client cannot be built.
    pub fn new(endpoint: &str, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).into_app_err_with(|| format!("invalid summary endpoint '{endpoint}'"))?;
        let client = reqwest::Client::builder()
            .user_agent("artifact-rank")
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client: Arc::new(client),
            endpoint,
            model: model.into(),
            timeout,
        })
    }

    async fn request(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        log::debug!(target: LOG_TARGET, "Requesting a README summary from {} using model '{}'", self.endpoint, self.model);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .into_app_err_with(|| format!("could not reach summary endpoint {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(app_err!("summary endpoint {} returned HTTP {status}", self.endpoint));
        }

        let generated: GenerateResponse = response.json().await.into_app_err("could not decode the summary response")?;
        Ok(generated.response)
    }

    async fn request_with_timeout(&self, prompt: &str) -> Result<String> {
        tokio::time::timeout(self.timeout, self.request(prompt))
            .await
            .into_app_err_with(|| format!("summary request timed out after {}ms", self.timeout.as_millis()))?
    }
}

impl SummaryClient for HttpSummaryClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(handle) = Handle::try_current() {
            return handle.block_on(self.request_with_timeout(prompt));
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .into_app_err("unable to start a runtime for the summary request")?;
        runtime.block_on(self.request_with_timeout(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_endpoints() {
        let _ = HttpSummaryClient::new("not a url", "llama3.2", Duration::from_secs(1)).unwrap_err();
    }

    #[test]
    fn unreachable_endpoint_is_an_error() {
        let client = HttpSummaryClient::new("http://127.0.0.1:9/api/generate", "llama3.2", Duration::from_millis(500)).unwrap();
        let _ = client.generate("hello").unwrap_err();
    }
}
