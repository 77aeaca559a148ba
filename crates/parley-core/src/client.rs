use crate::error::ClientError;
use crate::settings::Settings;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Decoded body of a successful generate call. Fields other than
/// `response` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InferenceReply {
    #[serde(default)]
    pub response: Option<String>,
}

/// Something that turns a prompt into a reply.
///
/// `Ok(None)` means the server answered without a usable reply (any non-200
/// status). `Err` is reserved for calls that never got an answer.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Option<InferenceReply>, ClientError>;
}

/// Non-streaming client for an Ollama-compatible `/api/generate` route.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            url: settings.generate_url(),
            model: settings.model.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<Option<InferenceReply>, ClientError> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        tracing::debug!(url = %self.url, model = %self.model, "posting generate request");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "generate request failed");
                ClientError::transport(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%status, "inference server returned no usable reply");
            return Ok(None);
        }

        let reply: InferenceReply = response.json().await.map_err(ClientError::decode)?;
        Ok(Some(reply))
    }
}
