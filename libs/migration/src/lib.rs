pub use sea_orm_migration::prelude::*;

mod m20250901_000000_create_restaurants;
mod m20250901_000001_create_reviews;
mod m20250901_000002_seed_restaurants;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000000_create_restaurants::Migration),
            Box::new(m20250901_000001_create_reviews::Migration),
            Box::new(m20250901_000002_seed_restaurants::Migration),
        ]
    }
}
