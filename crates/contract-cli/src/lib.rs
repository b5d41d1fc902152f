//! CLI library components for the contract cleaner.

pub mod config;
pub mod logging;
pub mod pipeline;
