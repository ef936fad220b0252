#![doc(test(attr(deny(warnings))))]

//! Funding Report validates a year of political-funding ledger entries and
//! converts them into the summary, flow graph, and transaction shares that the
//! report pages render.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

pub use crate::config::ConverterConfig;
pub use crate::core::services::{convert, validate, ValidationWarning};
pub use crate::domain::{Dataset, Report};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Funding Report tracing initialized.");
    });
}
