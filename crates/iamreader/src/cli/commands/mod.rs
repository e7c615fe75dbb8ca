//! Command implementations and dispatch.

pub mod captions;
pub mod check;
pub mod config;
pub mod lookup;
pub mod matching;
pub mod tags;
pub mod template;
pub mod tree;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Tree(output) => tree::run(ctx, &output),
        Commands::Lookup(cmd) => lookup::run(ctx, &cmd),
        Commands::Match(output) => matching::run(ctx, &output),
        Commands::Tags(cmd) => tags::run(ctx, &cmd),
        Commands::Captions(output) => captions::run(ctx, &output),
        Commands::Template(cmd) => template::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
