use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity::{restaurant, review},
    error::{FeedbackError, FeedbackResult},
    models::{NewReview, Review},
    repository::FeedbackRepository,
};

/// PostgreSQL-backed implementation of FeedbackRepository
pub struct PgFeedbackRepository {
    db: DatabaseConnection,
}

impl PgFeedbackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> FeedbackError {
    FeedbackError::Database(format!("Database error: {}", e))
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn restaurant_exists(&self, restaurant_id: &str) -> FeedbackResult<bool> {
        let found = restaurant::Entity::find_by_id(restaurant_id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(found.is_some())
    }

    async fn insert_review(&self, input: NewReview) -> FeedbackResult<Review> {
        let active_model: review::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(db_error)?;

        tracing::info!(review_id = %model.id, restaurant_id = %model.restaurant_id, "Created review");
        Ok(model.into())
    }

    async fn get_review(&self, id: Uuid) -> FeedbackResult<Option<Review>> {
        let model = review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn find_unembedded_by_id(&self, id: Uuid) -> FeedbackResult<Option<Review>> {
        let model = review::Entity::find_by_id(id)
            .filter(review::Column::Embedding.is_null())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn find_latest_unembedded(
        &self,
        restaurant_id: &str,
        content: &str,
    ) -> FeedbackResult<Option<Review>> {
        // UUIDv7 ids are time-ordered, so the id tiebreak keeps the order
        // stable for rows inserted within the same timestamp
        let model = review::Entity::find()
            .filter(review::Column::RestaurantId.eq(restaurant_id))
            .filter(review::Column::Content.eq(content))
            .filter(review::Column::Embedding.is_null())
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn set_embedding(&self, id: Uuid, embedding: &[f32]) -> FeedbackResult<bool> {
        let value = serde_json::to_value(embedding)
            .map_err(|e| FeedbackError::Database(format!("Failed to serialize embedding: {}", e)))?;

        let active_model = review::ActiveModel {
            id: Set(id),
            embedding: Set(Some(value)),
            ..Default::default()
        };

        match review::Entity::update(active_model).exec(&self.db).await {
            Ok(model) => {
                tracing::info!(review_id = %model.id, "Stored review embedding");
                Ok(true)
            }
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(db_error(e)),
        }
    }
}
