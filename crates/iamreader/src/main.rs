//! Command-line entry point for `iamreader`.

use std::process::ExitCode;

use clap::Parser;
use iamreader::cli::{
    args::Cli,
    commands,
    context::CommandContext,
    logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let ctx = match CommandContext::load(&cli.global) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    logging::init(cli.global.debug, &ctx.config.logging.level);

    commands::run(cli.command, &ctx)
}
