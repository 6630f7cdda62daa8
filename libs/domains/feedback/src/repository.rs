use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::FeedbackResult;
use crate::models::{NewReview, Restaurant, Review};

/// Repository trait for the feedback store.
///
/// The intake path uses `restaurant_exists` and `insert_review`; the
/// embedding worker uses the two lookup methods and `set_embedding`. The
/// lookup and the update are deliberately separate calls: the worker keys
/// the update by the resolved id, never by re-applying the filter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Check whether a restaurant with the given id exists
    async fn restaurant_exists(&self, restaurant_id: &str) -> FeedbackResult<bool>;

    /// Insert a new review with no embedding
    async fn insert_review(&self, input: NewReview) -> FeedbackResult<Review>;

    /// Get a review by id
    async fn get_review(&self, id: Uuid) -> FeedbackResult<Option<Review>>;

    /// Find the unembedded review with the given id, if any
    async fn find_unembedded_by_id(&self, id: Uuid) -> FeedbackResult<Option<Review>>;

    /// Find the most recent unembedded review matching restaurant and
    /// exact content (newest `created_at` first, id as tiebreak)
    async fn find_latest_unembedded(
        &self,
        restaurant_id: &str,
        content: &str,
    ) -> FeedbackResult<Option<Review>>;

    /// Write the embedding vector on the review with the given id.
    /// Returns false when no such row exists. The write is unconditional:
    /// a second worker resolving the same id overwrites the vector.
    async fn set_embedding(&self, id: Uuid, embedding: &[f32]) -> FeedbackResult<bool>;
}

/// In-memory implementation of FeedbackRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryFeedbackRepository {
    restaurants: Arc<RwLock<HashMap<String, Restaurant>>>,
    reviews: Arc<RwLock<Vec<Review>>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a restaurant. Restaurants are owned externally, so this
    /// is an inherent method rather than part of the repository trait.
    pub async fn seed_restaurant(&self, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        let restaurant = Restaurant {
            id: id.clone(),
            name: name.into(),
            created_at: Utc::now(),
        };
        self.restaurants.write().await.insert(id, restaurant);
    }

    /// Total number of stored reviews (test helper)
    pub async fn review_count(&self) -> usize {
        self.reviews.read().await.len()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn restaurant_exists(&self, restaurant_id: &str) -> FeedbackResult<bool> {
        let restaurants = self.restaurants.read().await;
        Ok(restaurants.contains_key(restaurant_id))
    }

    async fn insert_review(&self, input: NewReview) -> FeedbackResult<Review> {
        let review = Review::new(input);
        self.reviews.write().await.push(review.clone());

        tracing::info!(review_id = %review.id, restaurant_id = %review.restaurant_id, "Created review");
        Ok(review)
    }

    async fn get_review(&self, id: Uuid) -> FeedbackResult<Option<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn find_unembedded_by_id(&self, id: Uuid) -> FeedbackResult<Option<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .find(|r| r.id == id && r.embedding.is_none())
            .cloned())
    }

    async fn find_latest_unembedded(
        &self,
        restaurant_id: &str,
        content: &str,
    ) -> FeedbackResult<Option<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .filter(|r| {
                r.restaurant_id == restaurant_id
                    && r.content == content
                    && r.embedding.is_none()
            })
            .max_by_key(|r| (r.created_at, r.id))
            .cloned())
    }

    async fn set_embedding(&self, id: Uuid, embedding: &[f32]) -> FeedbackResult<bool> {
        let mut reviews = self.reviews.write().await;

        match reviews.iter_mut().find(|r| r.id == id) {
            Some(review) => {
                review.embedding = Some(embedding.to_vec());
                tracing::info!(review_id = %id, "Stored review embedding");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
