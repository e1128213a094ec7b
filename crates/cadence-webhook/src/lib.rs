//! Chat webhook delivery for the Cadence announcer.

pub mod webhook_client;

pub use webhook_client::*;
