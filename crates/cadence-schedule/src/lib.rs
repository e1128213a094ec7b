//! Schedule configuration and message composition for the Cadence announcer.
//!
//! Covers the configuration document (loaded once, validated fail-fast), the
//! date-cycle evaluator that maps "today" onto the repeating period, and the
//! recurring-line compiler plus message assembler.

pub mod schedule_compose;
pub mod schedule_config;
pub mod schedule_cycle;

pub use schedule_compose::*;
pub use schedule_config::*;
pub use schedule_cycle::*;
