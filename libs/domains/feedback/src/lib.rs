//! Feedback Domain
//!
//! Domain implementation for the diner feedback pipeline: validated intake
//! of free-text reviews and asynchronous attachment of semantic vector
//! embeddings.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐      fire-and-forget      ┌───────────────────┐
//! │ FeedbackService   │ ─────────────────────────▶ │ EmbeddingService  │
//! │ (intake)          │      EmbeddingTrigger      │ (worker)          │
//! └────────┬──────────┘                            └────────┬──────────┘
//!          │ insert review                                  │ embed + reconcile
//! ┌────────▼───────────────────────────────────────────────▼──────────┐
//! │                      FeedbackRepository                            │
//! │          (trait + in-memory and PostgreSQL backends)               │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The intake path persists the review before the embedding trigger is
//! issued, and the trigger outcome never affects the intake result. The
//! worker locates the review either directly by id (when the trigger
//! carried one) or by content-based reconciliation: the most recent
//! unembedded review with matching restaurant and text.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_feedback::{
//!     handlers,
//!     repository::InMemoryFeedbackRepository,
//!     service::FeedbackService,
//!     trigger::HttpEmbeddingTrigger,
//! };
//!
//! let repository = InMemoryFeedbackRepository::new();
//! let trigger = HttpEmbeddingTrigger::new("http://localhost:8081").unwrap();
//! let service = FeedbackService::new(repository, trigger);
//!
//! let router = handlers::feedback_router(service);
//! ```

pub mod embedder;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod trigger;

// Re-export commonly used types
pub use embedder::{Embedder, HttpEmbedder};
pub use error::{FeedbackError, FeedbackResult};
pub use handlers::{ApiDoc, WorkerApiDoc};
pub use models::{
    EMBEDDING_DIM, EmbeddingRequest, EmbeddingResponse, NewReview, Restaurant, Review,
    SubmitFeedback, SubmitFeedbackResponse,
};
pub use postgres::PgFeedbackRepository;
pub use repository::{FeedbackRepository, InMemoryFeedbackRepository};
pub use service::{EmbeddingService, FeedbackService};
pub use trigger::{EmbeddingTrigger, HttpEmbeddingTrigger};
