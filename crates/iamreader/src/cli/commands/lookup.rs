//! Implementation of `iamreader lookup`.

use std::process::ExitCode;

use iamreader_annotations::NodeRef;
use serde::Serialize;

use crate::cli::{
    args::LookupCommand,
    context::CommandContext,
    output::{author, dim, header, print_json, subheader},
};

/// JSON shape of a lookup result.
#[derive(Serialize)]
struct JsonLookup {
    /// The requested media id.
    media_id: String,
    /// Display title of the node.
    title: String,
    /// Author declared on the node itself.
    author: String,
    /// Author of the book the node belongs to.
    top_author: String,
    /// Titles from the first level below the root down to the node.
    title_path: Vec<String>,
    /// 1-based line in the index.
    line: usize,
}

impl JsonLookup {
    /// Collects the resolved attributes of `node`.
    fn from_node(id: &str, node: NodeRef<'_>) -> Self {
        Self {
            media_id: id.to_string(),
            title: node.title.clone(),
            author: node.author.clone(),
            top_author: node.author_of_top_ancestor(),
            title_path: node.full_title_path(false),
            line: node.line,
        }
    }
}

/// Shows the index entry bound to a media id.
pub fn run(ctx: &CommandContext, cmd: &LookupCommand) -> ExitCode {
    let tree = match ctx.annotations() {
        Ok(tree) => tree,
        Err(code) => return code,
    };

    let Some(node) = tree.node_by_media_id(&cmd.id) else {
        eprintln!("error: no index entry for media id '{}'", cmd.id);
        return ExitCode::FAILURE;
    };

    let found = JsonLookup::from_node(&cmd.id, node);
    if cmd.output.json {
        return print_json(&found);
    }

    println!("{}", header(&found.title));
    println!("{} {}", subheader("Media id:"), found.media_id);
    if found.top_author.is_empty() {
        println!("{} {}", subheader("Author:"), dim("(none)"));
    } else {
        println!("{} {}", subheader("Author:"), author(&found.top_author));
    }
    println!("{} {}", subheader("Path:"), found.title_path.join(" / "));
    println!("{} {}", subheader("Line:"), found.line);
    ExitCode::SUCCESS
}
