//! Date-cycle evaluation: maps "today" onto the repeating schedule.

use chrono::{Duration, NaiveDate};

use crate::{ScheduleConfig, Slot};

/// Position of `today` inside the repeating period, always in `[0, period)`
/// even when `today` precedes the schedule start.
pub fn cycle_offset(today: NaiveDate, start: NaiveDate, period: i64) -> i64 {
    (today - start).num_days().rem_euclid(period)
}

/// Returns the slot active for `today`, if any, together with the reference
/// date its lines render against (`today` shifted by the slot offset).
pub fn active_slot(config: &ScheduleConfig, today: NaiveDate) -> Option<(&Slot, NaiveDate)> {
    let offset = cycle_offset(today, config.start, config.period);
    let slot = config.messages.get(&offset)?;
    Some((slot, today + Duration::days(slot.offset)))
}
