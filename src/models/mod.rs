//! # Data Models
//!
//! This module contains all the data models used throughout the Sales Assist
//! Reset API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod dealership;
pub mod profile;
pub mod reset_configuration;
pub mod submission;
pub mod user_choice_total;

pub use dealership::Entity as Dealership;
pub use profile::Entity as Profile;
pub use reset_configuration::Entity as ResetConfiguration;
pub use submission::Entity as Submission;
pub use user_choice_total::Entity as UserChoiceTotal;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "sales-assist-resets".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
