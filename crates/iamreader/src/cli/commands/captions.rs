//! Implementation of `iamreader captions`.

use std::process::ExitCode;

use iamreader_config::Config;
use iamreader_plan::{CaptionLayout, plan_captions};

use crate::cli::{
    args::OutputArgs,
    context::CommandContext,
    output::{dim, media_id, print_json, rule, warning},
};

/// Builds the caption layout from configured paths.
fn layout(config: &Config) -> CaptionLayout {
    CaptionLayout::new(
        &config.caption.separator,
        &config.paths.resources,
        &config.paths.images,
        &config.paths.video,
    )
}

/// Shows the caption text and output paths for each matched media file.
pub fn run(ctx: &CommandContext, output: &OutputArgs) -> ExitCode {
    let tree = match ctx.annotations() {
        Ok(tree) => tree,
        Err(code) => return code,
    };
    let files = match ctx.media_files() {
        Ok(files) => files,
        Err(code) => return code,
    };

    let layout = layout(&ctx.config);
    let plans = plan_captions(tree.nodes_for_paths(&files), &layout);

    if output.json {
        return print_json(&plans);
    }

    if !layout.template.is_file() {
        println!(
            "{}",
            warning(&format!(
                "background template missing: {}",
                layout.template.display()
            ))
        );
    }

    for plan in &plans {
        println!("{}", media_id(&plan.stem));
        for line in plan.text.lines() {
            println!("  {line}");
        }
        println!("  {}", dim(&format!("-> {}", plan.video.display())));
        println!("{}", rule(40));
    }
    ExitCode::SUCCESS
}
