//! Two-stage pipeline tests
//!
//! These tests wire the intake service and the embedding service against a
//! shared in-memory store, with the trigger routed in-process instead of
//! over HTTP. They verify the end-to-end contract: intake never waits for
//! the embedding, and the embedding lands on the review that produced it.

use async_trait::async_trait;
use domain_feedback::*;
use std::time::Duration;
use test_utils::{
    TestDataBuilder, embedding_fixture,
    assertions::{assert_embedding_eq, assert_some, assert_uuid_eq},
};
use tokio::sync::mpsc;

/// Embedder stub: deterministic per-text vector, so tests can check which
/// text an attached embedding came from
struct FixedEmbedder;

fn fixture_for(text: &str) -> Vec<f32> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    embedding_fixture(hasher.finish(), EMBEDDING_DIM)
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, text: &str) -> FeedbackResult<Vec<f32>> {
        Ok(fixture_for(text))
    }
}

/// Trigger that dispatches to an in-process embedding service and reports
/// each outcome on a channel so tests can await the asynchronous stage
struct LocalTrigger {
    worker: EmbeddingService<InMemoryFeedbackRepository, FixedEmbedder>,
    done: mpsc::UnboundedSender<FeedbackResult<EmbeddingResponse>>,
    // When set, the forwarded request carries no review id, forcing the
    // worker onto the content-reconciliation path
    strip_review_id: bool,
}

#[async_trait]
impl EmbeddingTrigger for LocalTrigger {
    async fn trigger(&self, mut request: EmbeddingRequest) -> FeedbackResult<EmbeddingResponse> {
        if self.strip_review_id {
            request.review_id = None;
        }
        let result = self.worker.attach_embedding(request).await;
        let _ = self.done.send(result.clone());
        result
    }
}

type DoneRx = mpsc::UnboundedReceiver<FeedbackResult<EmbeddingResponse>>;

async fn pipeline(
    strip_review_id: bool,
) -> (
    FeedbackService<InMemoryFeedbackRepository, LocalTrigger>,
    InMemoryFeedbackRepository,
    DoneRx,
) {
    let repo = InMemoryFeedbackRepository::new();
    repo.seed_restaurant("R1", "Trattoria Uno").await;

    let (done, rx) = mpsc::unbounded_channel();
    let trigger = LocalTrigger {
        worker: EmbeddingService::new(repo.clone(), FixedEmbedder),
        done,
        strip_review_id,
    };

    (FeedbackService::new(repo.clone(), trigger), repo, rx)
}

fn submission(feedback: &str) -> SubmitFeedback {
    SubmitFeedback {
        restaurant_id: "R1".to_string(),
        table_id: None,
        feedback: feedback.to_string(),
    }
}

async fn await_worker(rx: &mut DoneRx) -> FeedbackResult<EmbeddingResponse> {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("worker did not run")
        .expect("trigger channel closed")
}

#[tokio::test]
async fn test_pipeline_attaches_embedding_via_review_id() {
    let (service, repo, mut rx) = pipeline(false).await;

    let review = service.submit_feedback(submission("Great soup!")).await.unwrap();
    assert!(review.embedding.is_none());

    let response = await_worker(&mut rx).await.unwrap();
    assert!(response.success);
    assert_uuid_eq(response.review_id, review.id, "worker response");

    let stored = repo.get_review(review.id).await.unwrap().unwrap();
    let embedding = assert_some(stored.embedding, "attached embedding");
    assert_embedding_eq(&embedding, &fixture_for("Great soup!"), "attached embedding");
    // Everything else on the row is untouched
    assert_eq!(stored.content, review.content);
    assert_eq!(stored.created_at, review.created_at);
}

#[tokio::test]
async fn test_pipeline_attaches_embedding_via_content_match() {
    let (service, repo, mut rx) = pipeline(true).await;

    let review = service
        .submit_feedback(submission("  Great soup!  "))
        .await
        .unwrap();

    // Intake trims before storing and before triggering, so the worker's
    // exact-content match finds the row
    let response = await_worker(&mut rx).await.unwrap();
    assert_eq!(response.review_id, review.id);

    let stored = repo.get_review(review.id).await.unwrap().unwrap();
    assert_eq!(stored.embedding, Some(fixture_for("Great soup!")));
}

#[tokio::test]
async fn test_pipeline_duplicate_content_drains_newest_first() {
    let (service, repo, mut rx) = pipeline(true).await;

    let first = service.submit_feedback(submission("Great soup!")).await.unwrap();
    let first_done = await_worker(&mut rx).await.unwrap();
    // With only one unembedded candidate, the content match is exact
    assert_eq!(first_done.review_id, first.id);

    // Two more identical submissions; each worker pass picks the newest
    // still-unembedded row, so after both passes every row is embedded
    let second = service.submit_feedback(submission("Great soup!")).await.unwrap();
    let third = service.submit_feedback(submission("Great soup!")).await.unwrap();

    let mut resolved = vec![
        await_worker(&mut rx).await.unwrap().review_id,
        await_worker(&mut rx).await.unwrap().review_id,
    ];
    resolved.sort();
    let mut expected = vec![second.id, third.id];
    expected.sort();
    assert_eq!(resolved, expected);

    for id in [first.id, second.id, third.id] {
        let stored = repo.get_review(id).await.unwrap().unwrap();
        assert!(stored.embedding.is_some(), "review {} left unembedded", id);
    }
}

#[tokio::test]
async fn test_pipeline_review_id_targets_exact_row_despite_duplicates() {
    let (service, repo, mut rx) = pipeline(false).await;

    let older = service.submit_feedback(submission("Great soup!")).await.unwrap();
    let older_done = await_worker(&mut rx).await.unwrap();
    assert_eq!(older_done.review_id, older.id);

    // A newer duplicate would win a content match; the id-carrying trigger
    // is immune to that
    let newer = service.submit_feedback(submission("Great soup!")).await.unwrap();
    let newer_done = await_worker(&mut rx).await.unwrap();
    assert_eq!(newer_done.review_id, newer.id);
}

#[tokio::test]
async fn test_embed_is_deterministic_and_round_trips_through_store() {
    let embedder = FixedEmbedder;
    let first = embedder.embed("Great soup!").await.unwrap();
    let second = embedder.embed("Great soup!").await.unwrap();
    assert_embedding_eq(&first, &second, "repeated embed of the same text");
    assert_eq!(first.len(), EMBEDDING_DIM);

    let builder = TestDataBuilder::from_test_name("embed_round_trip");
    let repo = InMemoryFeedbackRepository::new();
    let review = repo
        .insert_review(NewReview {
            restaurant_id: builder.restaurant_id("main"),
            table_id: None,
            content: "Great soup!".to_string(),
        })
        .await
        .unwrap();

    assert!(repo.set_embedding(review.id, &first).await.unwrap());
    let stored = repo.get_review(review.id).await.unwrap().unwrap();
    let stored_embedding = assert_some(stored.embedding, "stored embedding");
    assert_embedding_eq(&stored_embedding, &first, "stored embedding");
}

// Pins the documented select-then-update race: two workers that both
// select before either writes converge on the newest duplicate. The last
// write wins and the older row stays unembedded.
#[tokio::test]
async fn test_interleaved_duplicate_resolution_converges_on_newest_row() {
    let repo = InMemoryFeedbackRepository::new();

    let older = repo
        .insert_review(NewReview {
            restaurant_id: "R1".to_string(),
            table_id: None,
            content: "Great soup!".to_string(),
        })
        .await
        .unwrap();
    let newer = repo
        .insert_review(NewReview {
            restaurant_id: "R1".to_string(),
            table_id: None,
            content: "Great soup!".to_string(),
        })
        .await
        .unwrap();

    // Both selects run before either write
    let first_target = repo
        .find_latest_unembedded("R1", "Great soup!")
        .await
        .unwrap()
        .unwrap();
    let second_target = repo
        .find_latest_unembedded("R1", "Great soup!")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first_target.id, newer.id);
    assert_eq!(second_target.id, newer.id);

    let first_vector = vec![0.1; EMBEDDING_DIM];
    let second_vector = vec![0.2; EMBEDDING_DIM];
    assert!(repo.set_embedding(first_target.id, &first_vector).await.unwrap());
    assert!(repo.set_embedding(second_target.id, &second_vector).await.unwrap());

    let stored_newer = repo.get_review(newer.id).await.unwrap().unwrap();
    assert_eq!(stored_newer.embedding, Some(second_vector));

    let stored_older = repo.get_review(older.id).await.unwrap().unwrap();
    assert!(stored_older.embedding.is_none());
}

#[tokio::test]
async fn test_intake_does_not_wait_for_slow_worker() {
    struct StuckTrigger;

    #[async_trait]
    impl EmbeddingTrigger for StuckTrigger {
        async fn trigger(&self, _request: EmbeddingRequest) -> FeedbackResult<EmbeddingResponse> {
            futures::future::pending().await
        }
    }

    let repo = InMemoryFeedbackRepository::new();
    repo.seed_restaurant("R1", "Trattoria Uno").await;
    let service = FeedbackService::new(repo.clone(), StuckTrigger);

    let review = tokio::time::timeout(
        Duration::from_secs(1),
        service.submit_feedback(submission("Great soup!")),
    )
    .await
    .expect("intake blocked on the embedding stage")
    .unwrap();

    let stored = repo.get_review(review.id).await.unwrap().unwrap();
    assert!(stored.embedding.is_none());
}

#[tokio::test]
async fn test_intake_survives_worker_rejection() {
    // Worker finds no match for a foreign restaurant id, reports an error
    // on the trigger path; the intake result is unaffected
    let repo = InMemoryFeedbackRepository::new();
    repo.seed_restaurant("R1", "Trattoria Uno").await;

    let other_store = InMemoryFeedbackRepository::new();
    let (done, mut rx) = mpsc::unbounded_channel();
    let trigger = LocalTrigger {
        worker: EmbeddingService::new(other_store, FixedEmbedder),
        done,
        strip_review_id: false,
    };
    let service = FeedbackService::new(repo.clone(), trigger);

    let review = service.submit_feedback(submission("Great soup!")).await.unwrap();

    let outcome = await_worker(&mut rx).await;
    assert!(matches!(outcome, Err(FeedbackError::ReviewNotFound)));

    let stored = repo.get_review(review.id).await.unwrap().unwrap();
    assert!(stored.embedding.is_none());
}
