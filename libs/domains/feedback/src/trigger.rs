//! Embedding trigger boundary.
//!
//! The intake service signals the embedding worker through this interface
//! after the review row is committed. The call is made from an independent
//! task and its outcome never affects the intake result.

use async_trait::async_trait;

use crate::error::{FeedbackError, FeedbackResult};
use crate::models::{EmbeddingRequest, EmbeddingResponse};

/// Interface for signalling the embedding worker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingTrigger: Send + Sync {
    async fn trigger(&self, request: EmbeddingRequest) -> FeedbackResult<EmbeddingResponse>;
}

/// HTTP trigger posting the request to the worker's
/// `/generate-embedding` endpoint.
pub struct HttpEmbeddingTrigger {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEmbeddingTrigger {
    /// `worker_url` is the worker's base URL (e.g. `http://localhost:8081`)
    pub fn new(worker_url: impl AsRef<str>) -> FeedbackResult<Self> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            FeedbackError::Embedding(format!("Failed to build trigger client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: format!("{}/generate-embedding", worker_url.as_ref().trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl EmbeddingTrigger for HttpEmbeddingTrigger {
    async fn trigger(&self, request: EmbeddingRequest) -> FeedbackResult<EmbeddingResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| FeedbackError::Embedding(format!("Embedding trigger failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedbackError::Embedding(format!(
                "Embedding worker returned status {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            FeedbackError::Embedding(format!("Invalid embedding worker response: {}", e))
        })
    }
}
