//! CLI library components for the data-quality rule set tool.

pub mod cli;
pub mod commands;
pub mod dataset;
pub mod logging;
