//! Reset due-date evaluator
//!
//! Pure date arithmetic deciding whether a dealership's periodic reset is due
//! at a given moment. No I/O and no implicit clock: `now` is always an
//! explicit parameter, so each call is deterministic for fixed inputs and the
//! tests can freeze time.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use super::cadence::Cadence;

/// Whether a reset is due at `now` for the given configuration.
///
/// `reset_time` is the configured time-of-day; `last_reset` is the calendar
/// date of the most recent successful reset (or the sentinel default when the
/// dealership has never been reset). A reset never fires before the
/// configured time-of-day has passed on the current day.
pub fn is_due(
    cadence: Cadence,
    reset_time: NaiveTime,
    last_reset: NaiveDate,
    now: NaiveDateTime,
) -> bool {
    let today = now.date();
    let today_reset_moment = today.and_time(reset_time);
    let passed_today = now >= today_reset_moment;

    match cadence {
        Cadence::Daily => passed_today && last_reset != today,
        Cadence::Weekly => {
            // The reset day itself counts as the first day, so a Monday reset
            // becomes due again on the following Sunday at the reset time.
            let days_elapsed = today.signed_duration_since(last_reset).num_days() + 1;
            days_elapsed >= 7 && passed_today
        }
        Cadence::Monthly => {
            let different_month =
                today.month() != last_reset.month() || today.year() != last_reset.year();
            different_month && month_day_reached(last_reset, today) && passed_today
        }
        Cadence::Yearly => {
            today.year() > last_reset.year()
                || (today.year() == last_reset.year()
                    && today.ordinal() >= last_reset.ordinal()
                    && passed_today)
        }
    }
}

/// Whether `today`'s day-of-month has reached the day the last reset fired on.
///
/// This is the legacy comparison: a `last_reset` on the 31st never satisfies
/// `day >= 31` in a 30-day month, silently pushing the reset to the next month
/// long enough. Kept as-is for compatibility and isolated here so the policy
/// can be corrected without touching the rest of the evaluator.
pub fn month_day_reached(last_reset: NaiveDate, today: NaiveDate) -> bool {
    today.day() >= last_reset.day()
}
