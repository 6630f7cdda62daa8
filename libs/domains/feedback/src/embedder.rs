//! Embedding model interface.
//!
//! The model is an opaque collaborator: the pipeline only assumes
//! `embed(text) -> vector` with fixed dimensionality ([`crate::EMBEDDING_DIM`]),
//! mean-pooled and normalized semantics.

use async_trait::async_trait;
use core_config::embedding::EmbeddingConfig;
use serde::{Deserialize, Serialize};

use crate::error::{FeedbackError, FeedbackResult};

/// Interface for computing a semantic embedding from text.
///
/// Treated as a fallible remote operation; implementations are expected to
/// bound the call with a timeout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> FeedbackResult<Vec<f32>>;
}

#[derive(Serialize)]
struct EmbedApiRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedApiResponse {
    embedding: Vec<f32>,
}

/// HTTP client for an embedding model endpoint.
///
/// Sends `{"text": ...}` and expects `{"embedding": [f32, ...]}`. Every
/// failure mode (connect, timeout, non-success status, malformed body)
/// maps to [`FeedbackError::Embedding`].
pub struct HttpEmbedder {
    client: reqwest::Client,
    api_url: String,
}

impl HttpEmbedder {
    pub fn new(config: &EmbeddingConfig) -> FeedbackResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                FeedbackError::Embedding(format!("Failed to build embedding client: {}", e))
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> FeedbackResult<Vec<f32>> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&EmbedApiRequest { text })
            .send()
            .await
            .map_err(|e| {
                // reqwest reports an expired timeout as a request error
                FeedbackError::Embedding(format!("Embedding request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(FeedbackError::Embedding(format!(
                "Embedding model returned status {}",
                response.status()
            )));
        }

        let body: EmbedApiResponse = response.json().await.map_err(|e| {
            FeedbackError::Embedding(format!("Invalid embedding response: {}", e))
        })?;

        Ok(body.embedding)
    }
}
