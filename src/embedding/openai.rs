//! OpenAI Embeddings Client
//!
//! Async HTTP provider for the `/embeddings` endpoint of the OpenAI API (and
//! compatible servers). One request per text; no batching, no retries.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EmbeddingError;
use crate::vector::Embedding;

use super::EmbeddingProvider;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default embedding model (1536 dimensions)
pub const DEFAULT_MODEL: &str = "text-embedding-ada-002";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for [`OpenAiEmbeddings`]
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API root, without the trailing `/embeddings`
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiConfig {
    /// Default config with the key taken from `OPENAI_API_KEY`
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    encoding_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Embedding provider backed by the OpenAI HTTP API
pub struct OpenAiEmbeddings {
    client: Client,
    config: OpenAiConfig,
    api_key: String,
}

impl OpenAiEmbeddings {
    /// Create a client; fails when no API key is configured
    pub fn new(config: OpenAiConfig) -> Result<Self, EmbeddingError> {
        let api_key = config.api_key.clone().ok_or(EmbeddingError::MissingApiKey)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Create from the environment (see [`OpenAiConfig::from_env`])
    pub fn from_env() -> Result<Self, EmbeddingError> {
        Self::new(OpenAiConfig::from_env())
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    async fn request(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.config.model,
            input: text,
            encoding_format: "float",
        };

        debug!(model = %self.config.model, bytes = text.len(), "requesting embedding");

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&raw)
                .map(|b| b.error.message)
                .unwrap_or(raw);
            warn!(status = status.as_u16(), %message, "embedding request rejected");
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.bytes().await?;
        parse_response(&raw)
    }
}

/// Extract the single embedding from a response body
fn parse_response(raw: &[u8]) -> Result<Embedding, EmbeddingError> {
    let parsed: EmbeddingResponse = serde_json::from_slice(raw)
        .map_err(|e| EmbeddingError::MalformedResponse(e.to_string()))?;

    let data = parsed
        .data
        .into_iter()
        .min_by_key(|d| d.index)
        .ok_or_else(|| EmbeddingError::MalformedResponse("response contained no embeddings".into()))?;

    if data.embedding.is_empty() {
        return Err(EmbeddingError::MalformedResponse("embedding vector is empty".into()));
    }
    Ok(data.embedding)
}

impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.request(text).await
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
