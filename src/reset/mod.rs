//! # Reset Policy and Execution
//!
//! Everything that decides when a dealership's report data is wiped and
//! performs the wipe: the pure due-date evaluator, the executor that clears a
//! tenant's dataset, and the sweep that runs both across all configured
//! dealerships on behalf of an external timer.

pub mod cadence;
pub mod evaluator;
pub mod executor;
pub mod sweep;

pub use cadence::Cadence;
pub use executor::{ResetError, ResetExecutor, ResetOutcome};
pub use sweep::{ResetSweep, SweepReport};

use chrono::NaiveDate;

/// Sentinel `last_reset` date written when a configuration row is first
/// created, so the evaluator never operates on a missing date.
pub const SENTINEL_LAST_RESET: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => unreachable!(),
};
