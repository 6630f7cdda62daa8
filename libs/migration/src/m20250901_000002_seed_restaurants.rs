use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Sample restaurants for local development
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                INSERT INTO restaurants (id, name, created_at)
                VALUES
                    ('R1', 'Trattoria Uno', NOW()),
                    ('R2', 'Brasserie Deux', NOW())
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM restaurants WHERE id IN ('R1', 'R2')")
            .await?;

        Ok(())
    }
}
