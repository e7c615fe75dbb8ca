//! Implementation of `iamreader tags`.

use std::process::ExitCode;

use chrono::{Datelike, Local};
use iamreader_plan::{cover_image, plan_tags};

use crate::cli::{
    args::TagsCommand,
    context::CommandContext,
    output::{dim, print_json, table},
};

/// Shows the audio tags each matched media file would get.
pub fn run(ctx: &CommandContext, cmd: &TagsCommand) -> ExitCode {
    let tree = match ctx.annotations() {
        Ok(tree) => tree,
        Err(code) => return code,
    };
    let files = match ctx.media_files() {
        Ok(files) => files,
        Err(code) => return code,
    };

    let year = cmd.year.unwrap_or_else(|| Local::now().year());
    let cover = cover_image(&ctx.config.paths.resources);
    let plans = plan_tags(tree.nodes_for_paths(&files), year, cover.as_deref());

    if cmd.output.json {
        return print_json(&plans);
    }

    let mut rows = table(&["Track", "File", "Artist", "Album", "Title", "Year"]);
    for plan in &plans {
        rows.add_row(vec![
            plan.track.to_string(),
            plan.stem.clone(),
            plan.artist.clone(),
            plan.album.clone(),
            plan.title.clone(),
            plan.year.to_string(),
        ]);
    }
    println!("{rows}");
    match &cover {
        Some(path) => println!("{}", dim(&format!("Cover: {}", path.display()))),
        None => println!("{}", dim("No cover image.")),
    }
    ExitCode::SUCCESS
}
