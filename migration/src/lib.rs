//! Database migrations for the Sales Assist Reset API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_01_10_000001_create_dealerships;
mod m2025_01_10_000002_create_profiles;
mod m2025_01_10_000003_create_submissions;
mod m2025_01_10_000004_create_user_choice_totals;
mod m2025_01_10_000005_create_reset_configurations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_01_10_000001_create_dealerships::Migration),
            Box::new(m2025_01_10_000002_create_profiles::Migration),
            Box::new(m2025_01_10_000003_create_submissions::Migration),
            Box::new(m2025_01_10_000004_create_user_choice_totals::Migration),
            Box::new(m2025_01_10_000005_create_reset_configurations::Migration),
        ]
    }
}
