//! Profile entity model
//!
//! This module contains the SeaORM entity model for the profiles table,
//! which stores the per-dealership users (associates and managers).

use super::dealership::Entity as Dealership;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Role granted reset and configuration privileges for a dealership.
pub const MANAGER_ROLE: &str = "manager";

/// Profile entity representing a dealership-scoped user
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier for the profile (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Dealership this profile belongs to
    pub dealership_id: Uuid,

    /// Display name (optional)
    pub full_name: Option<String>,

    /// Role within the dealership (associate|manager)
    pub role: String,

    /// Timestamp when the profile was created
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Whether this profile carries the manager privilege.
    pub fn is_manager(&self) -> bool {
        self.role == MANAGER_ROLE
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Dealership",
        from = "Column::DealershipId",
        to = "super::dealership::Column::Id"
    )]
    Dealership,
}

impl Related<Dealership> for Entity {
    fn to() -> RelationDef {
        Relation::Dealership.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
