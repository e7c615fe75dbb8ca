//! Command-line interface: argument parsing, context and subcommands.

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;
pub mod media;
pub mod output;
