use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{ErrorResponse, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::embedder::Embedder;
use crate::error::FeedbackResult;
use crate::models::{EmbeddingRequest, EmbeddingResponse, SubmitFeedback, SubmitFeedbackResponse};
use crate::repository::FeedbackRepository;
use crate::service::{EmbeddingService, FeedbackService};
use crate::trigger::EmbeddingTrigger;

pub const FEEDBACK_TAG: &str = "feedback";
pub const EMBEDDING_TAG: &str = "embedding";

/// OpenAPI documentation for the feedback intake API
#[derive(OpenApi)]
#[openapi(
    paths(submit_feedback),
    components(schemas(SubmitFeedback, SubmitFeedbackResponse, ErrorResponse)),
    tags(
        (name = FEEDBACK_TAG, description = "Guest feedback intake endpoints")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the embedding worker API
#[derive(OpenApi)]
#[openapi(
    paths(generate_embedding),
    components(schemas(EmbeddingRequest, EmbeddingResponse, ErrorResponse)),
    tags(
        (name = EMBEDDING_TAG, description = "Review embedding endpoints")
    )
)]
pub struct WorkerApiDoc;

/// Create the feedback intake router
pub fn feedback_router<R, T>(service: FeedbackService<R, T>) -> Router
where
    R: FeedbackRepository + 'static,
    T: EmbeddingTrigger + 'static,
{
    Router::new()
        .route("/", post(submit_feedback))
        .with_state(Arc::new(service))
}

/// Create the embedding worker router
pub fn embedding_router<R, E>(service: EmbeddingService<R, E>) -> Router
where
    R: FeedbackRepository + 'static,
    E: Embedder + 'static,
{
    Router::new()
        .route("/generate-embedding", post(generate_embedding))
        .with_state(Arc::new(service))
}

/// Submit guest feedback for a restaurant
#[utoipa::path(
    post,
    path = "",
    tag = FEEDBACK_TAG,
    request_body = SubmitFeedback,
    responses(
        (status = 201, description = "Feedback accepted", body = SubmitFeedbackResponse),
        (status = 400, description = "Invalid submission", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn submit_feedback<R, T>(
    State(service): State<Arc<FeedbackService<R, T>>>,
    ValidatedJson(input): ValidatedJson<SubmitFeedback>,
) -> FeedbackResult<impl IntoResponse>
where
    R: FeedbackRepository + 'static,
    T: EmbeddingTrigger + 'static,
{
    service.submit_feedback(input).await?;

    // The embedding runs out of band; acceptance means the review row
    // is committed
    Ok((
        StatusCode::CREATED,
        Json(SubmitFeedbackResponse { ok: true }),
    ))
}

/// Compute and attach the embedding for a submitted review
#[utoipa::path(
    post,
    path = "/generate-embedding",
    tag = EMBEDDING_TAG,
    request_body = EmbeddingRequest,
    responses(
        (status = 200, description = "Embedding attached", body = EmbeddingResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "No matching review", body = ErrorResponse),
        (status = 500, description = "Embedding or storage failure", body = ErrorResponse)
    )
)]
async fn generate_embedding<R, E>(
    State(service): State<Arc<EmbeddingService<R, E>>>,
    ValidatedJson(request): ValidatedJson<EmbeddingRequest>,
) -> FeedbackResult<Json<EmbeddingResponse>>
where
    R: FeedbackRepository + 'static,
    E: Embedder + 'static,
{
    let response = service.attach_embedding(request).await?;
    Ok(Json(response))
}
