//! Calendar-day helpers shared by schedule evaluation and triage age math.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Returns the current calendar day in the reference timezone.
pub fn today_in_zone(zone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&zone).date_naive()
}

/// Returns the ISO weekday for a date (Monday = 1 .. Sunday = 7).
pub fn iso_weekday(date: NaiveDate) -> i64 {
    i64::from(date.weekday().number_from_monday())
}

/// Business-day adjustment for age boundaries. Walking `minimum_age` days
/// back from `today` lands inside the immediately preceding weekend exactly
/// when `minimum_age >= iso_weekday(today)`; the boundary then widens by the
/// two weekend days.
pub fn effective_minimum_age(today: NaiveDate, minimum_age: i64) -> i64 {
    if minimum_age >= iso_weekday(today) {
        minimum_age + 2
    } else {
        minimum_age
    }
}

/// Returns the newest `updated` day an item may carry while still counting
/// as at least `minimum_age` business-adjusted days old.
pub fn age_cutoff(today: NaiveDate, minimum_age: i64) -> NaiveDate {
    today - Duration::days(effective_minimum_age(today, minimum_age))
}

/// Whole days elapsed between `updated` and `today`.
pub fn age_in_days(today: NaiveDate, updated: NaiveDate) -> i64 {
    (today - updated).num_days()
}
