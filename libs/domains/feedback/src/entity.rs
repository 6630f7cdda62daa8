//! Sea-ORM entities for the restaurants and reviews tables.

use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod restaurant {
    use super::*;

    /// Restaurants table. Rows are created by migrations/seeding; the
    /// pipeline only reads them for existence checks.
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "restaurants")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Restaurant {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                created_at: model.created_at.into(),
            }
        }
    }
}

pub mod review {
    use super::*;

    /// Reviews table. The embedding is stored as a nullable JSONB array of
    /// floats; it is either null or a complete vector.
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "reviews")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub restaurant_id: String,
        pub table_id: Option<String>,
        #[sea_orm(column_type = "Text")]
        pub content: String,
        pub created_at: DateTimeWithTimeZone,
        pub embedding: Option<Json>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Review {
        fn from(model: Model) -> Self {
            // Parse the embedding vector from JSON; a malformed value is
            // treated as absent rather than failing the read path
            let embedding: Option<Vec<f32>> = model
                .embedding
                .and_then(|value| serde_json::from_value(value).ok());

            Self {
                id: model.id,
                restaurant_id: model.restaurant_id,
                table_id: model.table_id,
                content: model.content,
                created_at: model.created_at.into(),
                embedding,
            }
        }
    }

    impl From<crate::models::NewReview> for ActiveModel {
        fn from(input: crate::models::NewReview) -> Self {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                restaurant_id: Set(input.restaurant_id),
                table_id: Set(input.table_id),
                content: Set(input.content),
                created_at: Set(chrono::Utc::now().into()),
                embedding: Set(None),
            }
        }
    }
}
