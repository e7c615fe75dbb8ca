//! Implementation of `iamreader match`.

use std::{path::PathBuf, process::ExitCode};

use iamreader_annotations::FileMatch;
use serde::Serialize;

use crate::cli::{
    args::OutputArgs,
    context::CommandContext,
    output::{NONE, dim, print_json, table, warning},
};

/// JSON shape of one media file and its index entry.
#[derive(Serialize)]
struct JsonMatch {
    /// The media file.
    path: PathBuf,
    /// Media id taken from the file stem.
    stem: String,
    /// Title of the bound node, `null` when unmatched.
    title: Option<String>,
    /// Line of the bound node, `null` when unmatched.
    line: Option<usize>,
}

impl From<FileMatch<'_>> for JsonMatch {
    fn from(file: FileMatch<'_>) -> Self {
        Self {
            title: file.node.map(|node| node.title.clone()),
            line: file.node.map(|node| node.line),
            stem: file.stem,
            path: file.path,
        }
    }
}

/// Pairs media files in the audio directory with index entries.
pub fn run(ctx: &CommandContext, output: &OutputArgs) -> ExitCode {
    let tree = match ctx.annotations() {
        Ok(tree) => tree,
        Err(code) => return code,
    };
    let files = match ctx.media_files() {
        Ok(files) => files,
        Err(code) => return code,
    };

    let matches: Vec<JsonMatch> = tree.nodes_for_paths(&files).map(JsonMatch::from).collect();

    if output.json {
        return print_json(&matches);
    }

    if matches.is_empty() {
        println!(
            "{}",
            dim(&format!(
                "No media files in {}.",
                ctx.config.paths.audio.display()
            ))
        );
        return ExitCode::SUCCESS;
    }

    let mut rows = table(&["File", "Line", "Title"]);
    for m in &matches {
        rows.add_row(vec![
            m.stem.clone(),
            m.line.map_or_else(|| NONE.to_string(), |line| line.to_string()),
            m.title.clone().unwrap_or_else(|| NONE.to_string()),
        ]);
    }
    println!("{rows}");

    let unmatched = matches.iter().filter(|m| m.title.is_none()).count();
    if unmatched > 0 {
        println!(
            "{}",
            warning(&format!("{unmatched} file(s) have no index entry"))
        );
    }
    ExitCode::SUCCESS
}
