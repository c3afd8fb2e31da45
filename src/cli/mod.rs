//! CLI module
//!
//! Command-line interface for running queries.
//!
//! # Commands
//!
//! One subcommand per API module (`info`, `category-members`, `links`, ...)
//! plus `raw` for arbitrary parameters. Results go to stdout as JSON;
//! server warnings go to the log.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageArgs};
pub use runner::Runner;
