//! Implementation of `iamreader check`.

use std::process::ExitCode;

use iamreader_annotations::Annotations;
use iamreader_config::{ConfigWarning, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::{dim, error, subheader, success, warning},
};

/// Shows configuration files, paths, index health and validation warnings.
///
/// Exits with failure when any warning is reported.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    let config_files = discover_config_files(&ctx.cwd);
    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
    } else {
        for path in &config_files {
            println!("   {}", path.display());
        }
    }
    println!();

    println!("{}", subheader("Paths:"));
    println!("   resources {}", dim(&config.paths.resources.display().to_string()));
    println!("   audio     {}", dim(&config.paths.audio.display().to_string()));
    println!("   video     {}", dim(&config.paths.video.display().to_string()));
    println!("   images    {}", dim(&config.paths.images.display().to_string()));
    println!();

    let warnings = config.validate();
    let mut problems: Vec<String> = warnings.iter().map(ToString::to_string).collect();

    let index_path = ctx.index_path();
    println!("{}", subheader("Index:"));
    if index_path.is_file() {
        match Annotations::load(&index_path) {
            Ok(tree) => println!(
                "   {} {}",
                summarize(&tree),
                dim(&format!("({})", index_path.display()))
            ),
            Err(e) => {
                println!("   {}", error("unreadable"));
                problems.push(e.to_string());
            }
        }
    } else {
        println!("   {}", dim("(missing)"));
    }
    println!();

    if problems.is_empty() {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", problems.len())));
    for p in &problems {
        println!("   {}", warning(p));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Describes the size of a parsed index.
fn summarize(tree: &Annotations) -> String {
    let roots = tree.roots().count();
    let media = tree.media_ids().len();
    format!(
        "{} nodes, {roots} root(s), {media} media id(s)",
        tree.len()
    )
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::ResourcesMissing { .. } | ConfigWarning::IndexMissing { .. } => {
                println!(
                    "{}",
                    dim("Hint: set [paths] resources or [index] filename in .iamreader.toml")
                );
            }
            ConfigWarning::MediaPatternMatchesNothing { .. } => {
                println!("{}", dim("Hint: check [media] patterns against the audio directory"));
            }
            _ => {}
        }
    }
}
