use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250901_000000_create_restaurants::Restaurants;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(pk_uuid(Reviews::Id))
                    .col(string(Reviews::RestaurantId))
                    .col(string_null(Reviews::TableId))
                    .col(text(Reviews::Content))
                    .col(
                        timestamp_with_time_zone(Reviews::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    // Embedding vector stored as a JSONB array of floats;
                    // NULL until the worker attaches it
                    .col(json_binary_null(Reviews::Embedding))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_restaurant_id")
                            .from(Reviews::Table, Reviews::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the worker's newest-first reconciliation scan
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_restaurant_created_at")
                    .table(Reviews::Table)
                    .col(Reviews::RestaurantId)
                    .col(Reviews::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    RestaurantId,
    TableId,
    Content,
    CreatedAt,
    Embedding,
}
