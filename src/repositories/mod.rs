//! # Repositories
//!
//! Data access layer built on SeaORM entities. Each repository borrows a
//! database connection and owns the validation rules for its table.

pub mod dealership;
pub mod profile;
pub mod reset_configuration;
pub mod submission;
pub mod user_choice_total;

pub use dealership::DealershipRepository;
pub use profile::{CreateProfileRequest, ProfileRepository};
pub use submission::CreateSubmissionRequest;
pub use reset_configuration::ResetConfigurationRepository;
pub use submission::SubmissionRepository;
pub use user_choice_total::UserChoiceTotalRepository;
