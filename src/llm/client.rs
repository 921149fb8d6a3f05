use super::types::{GenerateRequest, GenerateResponse};
use crate::{Result, config::LlmConfig};
use async_trait::async_trait;
use tracing::debug;

/// Returned in place of generated text when the server answers with a
/// well-formed JSON body that carries no completion.
pub const FALLBACK_RESPONSE: &str = "Failed to get response.";

#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}

pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl VisionClient for OllamaClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        debug!(
            "Sending generate request to {} (model: {}, image attached: {})",
            self.base_url,
            request.model,
            request.images.is_some()
        );

        // Connectivity failures and non-JSON bodies propagate; a JSON body
        // of the wrong shape degrades to the fallback text instead.
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let body: GenerateResponse = response.json().await?;

        match body.response {
            Some(text) => {
                debug!("Received {} bytes of generated text", text.len());
                Ok(text)
            }
            None => {
                debug!("Response body carried no completion, using fallback text");
                Ok(FALLBACK_RESPONSE.to_string())
            }
        }
    }
}
