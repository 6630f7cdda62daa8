use std::sync::Arc;
use validator::Validate;

use crate::embedder::Embedder;
use crate::error::{FeedbackError, FeedbackResult};
use crate::models::{
    EMBEDDING_DIM, EmbeddingRequest, EmbeddingResponse, MAX_FEEDBACK_CHARS, NewReview, Review,
    SubmitFeedback,
};
use crate::repository::FeedbackRepository;
use crate::trigger::EmbeddingTrigger;

/// Service layer for the feedback intake path.
///
/// Validates a submission, verifies the restaurant exists, persists the
/// review, then signals the embedding worker from an independent task.
/// The trigger outcome never affects the intake result: by the time the
/// trigger is issued the review row is already committed.
#[derive(Clone)]
pub struct FeedbackService<R: FeedbackRepository, T: EmbeddingTrigger> {
    repository: Arc<R>,
    trigger: Arc<T>,
}

impl<R, T> FeedbackService<R, T>
where
    R: FeedbackRepository + 'static,
    T: EmbeddingTrigger + 'static,
{
    pub fn new(repository: R, trigger: T) -> Self {
        Self {
            repository: Arc::new(repository),
            trigger: Arc::new(trigger),
        }
    }

    /// Handle a feedback submission.
    ///
    /// Validation happens before any store access. A missing restaurant
    /// and a failed existence lookup are indistinguishable to the caller;
    /// both surface as not-found (the underlying error is logged).
    pub async fn submit_feedback(&self, input: SubmitFeedback) -> FeedbackResult<Review> {
        let content = input.feedback.trim().to_string();

        if content.is_empty() {
            return Err(FeedbackError::Validation("Feedback is required".to_string()));
        }
        if content.chars().count() > MAX_FEEDBACK_CHARS {
            return Err(FeedbackError::Validation(format!(
                "Feedback must not be longer than {} characters",
                MAX_FEEDBACK_CHARS
            )));
        }

        match self.repository.restaurant_exists(&input.restaurant_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(FeedbackError::RestaurantNotFound(input.restaurant_id));
            }
            Err(e) => {
                tracing::warn!(restaurant_id = %input.restaurant_id, error = %e, "Restaurant lookup failed");
                return Err(FeedbackError::RestaurantNotFound(input.restaurant_id));
            }
        }

        // Empty table ids from the form are stored as null
        let table_id = input.table_id.filter(|t| !t.trim().is_empty());

        let review = self
            .repository
            .insert_review(NewReview {
                restaurant_id: input.restaurant_id,
                table_id,
                content,
            })
            .await?;

        // Fire-and-forget: the row is committed, so the worker can always
        // find it. Failures are logged and never reach the caller.
        let trigger = Arc::clone(&self.trigger);
        let request = EmbeddingRequest {
            text: review.content.clone(),
            restaurant_id: review.restaurant_id.clone(),
            review_id: Some(review.id),
        };
        tokio::spawn(async move {
            match trigger.trigger(request).await {
                Ok(response) => {
                    tracing::debug!(review_id = %response.review_id, "Embedding attached");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to generate embedding for review");
                }
            }
        });

        Ok(review)
    }
}

/// Service layer for the embedding worker.
///
/// Computes the embedding for the submitted text, locates the review it
/// belongs to, and writes the vector back keyed by the resolved id.
#[derive(Clone)]
pub struct EmbeddingService<R: FeedbackRepository, E: Embedder> {
    repository: Arc<R>,
    embedder: Arc<E>,
}

impl<R, E> EmbeddingService<R, E>
where
    R: FeedbackRepository + 'static,
    E: Embedder + 'static,
{
    pub fn new(repository: R, embedder: E) -> Self {
        Self {
            repository: Arc::new(repository),
            embedder: Arc::new(embedder),
        }
    }

    /// Compute an embedding for the request text and attach it to the
    /// review that produced it.
    ///
    /// Resolution is by id when the request carries one, otherwise by
    /// content reconciliation: the most recent unembedded review with a
    /// matching restaurant and exact text. The two concurrent-duplicate
    /// caveat of the content path is documented on
    /// [`FeedbackRepository::find_latest_unembedded`].
    pub async fn attach_embedding(
        &self,
        request: EmbeddingRequest,
    ) -> FeedbackResult<EmbeddingResponse> {
        request
            .validate()
            .map_err(|_| FeedbackError::Validation("text and restaurant_id are required".to_string()))?;

        let vector = self.embedder.embed(&request.text).await?;

        // Never store a misshapen vector: a review's embedding is either
        // absent or a complete EMBEDDING_DIM-length vector
        if vector.len() != EMBEDDING_DIM {
            return Err(FeedbackError::Embedding(format!(
                "Expected a {}-dimensional embedding, got {}",
                EMBEDDING_DIM,
                vector.len()
            )));
        }

        let review = match request.review_id {
            Some(id) => self.repository.find_unembedded_by_id(id).await?,
            None => {
                self.repository
                    .find_latest_unembedded(&request.restaurant_id, &request.text)
                    .await?
            }
        }
        .ok_or(FeedbackError::ReviewNotFound)?;

        // Update keyed by the resolved id, not by re-applying the filter:
        // re-running the filter could land on a different row
        let updated = self.repository.set_embedding(review.id, &vector).await?;
        if !updated {
            return Err(FeedbackError::Database(
                "Embedding update affected no rows".to_string(),
            ));
        }

        Ok(EmbeddingResponse {
            success: true,
            review_id: review.id,
        })
    }
}
