//! Implementation of `iamreader template`.

use std::process::ExitCode;

use chrono::Local;
use iamreader_plan::{Ledger, materialize};
use tracing::warn;

use crate::cli::{args::TemplateCommand, context::CommandContext, output::print_json};

/// Prints the next publishing records for a service.
///
/// Records are built from the rendered videos, so each `fpath` names the file that
/// would be uploaded. They are printed, never written back; the ledger stays untouched.
pub fn run(ctx: &CommandContext, cmd: &TemplateCommand) -> ExitCode {
    let tree = match ctx.annotations() {
        Ok(tree) => tree,
        Err(code) => return code,
    };
    let files = match ctx.publish_files() {
        Ok(files) => files,
        Err(code) => return code,
    };

    let ledger_path = ctx.config.ledger_path();
    let ledger = match Ledger::load_or_default(&ledger_path) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if ledger.services().next().is_some() && !ledger.services().any(|s| s == cmd.service) {
        warn!(
            service = %cmd.service,
            known = %ledger.services().collect::<Vec<_>>().join(", "),
            "service not in ledger, using an empty template"
        );
    }

    let today = cmd.today.unwrap_or_else(|| Local::now().date_naive());
    match materialize(
        tree.nodes_for_paths(&files),
        &ledger.service(&cmd.service),
        today,
    ) {
        Ok(records) => print_json(&records),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
