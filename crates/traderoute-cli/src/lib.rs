//! Trade route planner CLI library.
//!
//! Subcommand handlers, terminal styling and output formatting for the
//! `traderoute-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
