//! Pull-request triage aggregation for the Cadence announcer.
//!
//! Builds tracker search queries for the sprint and idle review-request
//! groups, runs them concurrently behind a narrow search seam, and renders
//! the ranked summary section with deep links back to the live search.

pub mod triage_aggregator;
pub mod triage_client;
pub mod triage_query;
pub mod triage_render;

pub use triage_aggregator::*;
pub use triage_client::*;
pub use triage_query::*;
pub use triage_render::*;
