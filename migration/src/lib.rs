pub use sea_orm_migration::prelude::*;

mod m20251110_000001_create_dimension_tables;
mod m20251110_000002_create_fact_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251110_000001_create_dimension_tables::Migration),
            Box::new(m20251110_000002_create_fact_tables::Migration),
        ]
    }
}
