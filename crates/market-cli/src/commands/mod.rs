//! Command implementations for market-cli

pub mod browse;
pub mod migrate;

pub use browse::{ListArgs, run_list, run_show};
pub use migrate::{run_convert, run_extract, run_fix};
