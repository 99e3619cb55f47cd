pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20251101_000001_users;
mod m20251101_000002_shortcuts;
mod m20251101_000003_visits;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_users::Migration),
            Box::new(m20251101_000002_shortcuts::Migration),
            Box::new(m20251101_000003_visits::Migration),
        ]
    }
}
