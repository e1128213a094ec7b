//! Shared primitives for the Cadence announcer.
//!
//! Provides calendar-day helpers (reference-timezone "today", ISO weekday,
//! business-day-adjusted age boundaries) and the strftime-subset template
//! renderer used for schedule message lines.

pub mod template;
pub mod time_utils;

pub use template::*;
pub use time_utils::*;
