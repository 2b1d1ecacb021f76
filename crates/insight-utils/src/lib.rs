//! Shared utilities for insight-rs

pub mod logging;

pub use logging::init_tracing;
