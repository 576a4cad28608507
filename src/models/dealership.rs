//! Dealership entity model
//!
//! This module contains the SeaORM entity model for the dealerships table,
//! which is the tenant boundary for all report data.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Dealership entity representing a single tenant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "dealerships")]
pub struct Model {
    /// Unique identifier for the dealership (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name for the dealership (optional)
    pub name: Option<String>,

    /// Timestamp when the dealership was created
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
