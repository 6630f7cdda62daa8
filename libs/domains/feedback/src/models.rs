use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Dimensionality of the review embedding vector (gte-small, mean-pooled
/// and normalized). A review either has no embedding or a complete vector
/// of exactly this length.
pub const EMBEDDING_DIM: usize = 384;

/// Maximum feedback length in characters, measured after trimming
pub const MAX_FEEDBACK_CHARS: usize = 200;

/// Trim-aware validator for the feedback text: rejects whitespace-only
/// input and anything longer than [`MAX_FEEDBACK_CHARS`] after trimming.
fn validate_feedback_text(feedback: &str) -> Result<(), validator::ValidationError> {
    let trimmed = feedback.trim();
    if trimmed.is_empty() {
        return Err(validator::ValidationError::new("feedback_required"));
    }
    if trimmed.chars().count() > MAX_FEEDBACK_CHARS {
        return Err(validator::ValidationError::new("feedback_too_long"));
    }
    Ok(())
}

/// Restaurant entity. Owned and created externally; the pipeline only
/// checks that a submission references an existing restaurant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Restaurant {
    /// Opaque unique identifier
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Review entity - a persisted feedback record.
///
/// `embedding` is the only field ever mutated after creation, at most once,
/// by the embedding worker.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    /// System-assigned unique identifier (UUIDv7, time-ordered)
    pub id: Uuid,
    /// Restaurant the feedback belongs to
    pub restaurant_id: String,
    /// Optional table the feedback was submitted from
    pub table_id: Option<String>,
    /// Trimmed feedback text, 1-200 characters
    pub content: String,
    /// Insert timestamp
    pub created_at: DateTime<Utc>,
    /// Semantic vector, absent until the worker completes
    pub embedding: Option<Vec<f32>>,
}

/// DTO for a diner feedback submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitFeedback {
    #[validate(length(min = 1))]
    pub restaurant_id: String,
    pub table_id: Option<String>,
    #[validate(custom(function = "validate_feedback_text"))]
    pub feedback: String,
}

/// Success payload for a feedback submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitFeedbackResponse {
    pub ok: bool,
}

/// Insert payload for a review row; `content` is already trimmed
#[derive(Debug, Clone)]
pub struct NewReview {
    pub restaurant_id: String,
    pub table_id: Option<String>,
    pub content: String,
}

/// Payload crossing the fire-and-forget boundary between intake and worker.
///
/// `review_id` is an optional hardening: when present the worker resolves
/// the target row directly, bypassing the content-based reconciliation and
/// its duplicate-content ambiguity. The intake service always sends it;
/// external callers may omit it and rely on the original
/// `{text, restaurant_id}` contract.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmbeddingRequest {
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(min = 1))]
    pub restaurant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<Uuid>,
}

/// Success payload of the embedding worker, echoing the resolved review id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmbeddingResponse {
    pub success: bool,
    pub review_id: Uuid,
}

impl Review {
    /// Create a new unembedded review from an insert payload
    pub fn new(input: NewReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            restaurant_id: input.restaurant_id,
            table_id: input.table_id,
            content: input.content,
            created_at: Utc::now(),
            embedding: None,
        }
    }
}
