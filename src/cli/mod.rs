//! CLI module
//!
//! Command-line interface for invoking service operations.
//!
//! # Commands
//!
//! - `list` - Show available operations and their paging defaults
//! - `invoke` - Call an operation with JSON input, streaming results as JSON lines

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
