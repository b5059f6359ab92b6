use sea_orm_migration::prelude::*;

mod m20260305_000001_create_report_tables;
mod m20260312_000002_add_coordinates;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260305_000001_create_report_tables::Migration),
            Box::new(m20260312_000002_add_coordinates::Migration),
        ]
    }
}
