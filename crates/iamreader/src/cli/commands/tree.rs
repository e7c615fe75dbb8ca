//! Implementation of `iamreader tree`.

use std::process::ExitCode;

use iamreader_annotations::{Annotations, NodeRef};
use serde::Serialize;

use crate::cli::{
    args::OutputArgs,
    context::CommandContext,
    output::{author, media_id, print_json},
};

/// JSON shape of one node and its subtree.
#[derive(Serialize)]
struct JsonNode {
    /// Display title.
    title: String,
    /// Author declared on this node, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    /// Bound media id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    media_id: Option<String>,
    /// 1-based line in the index.
    line: usize,
    /// Child subtrees.
    children: Vec<JsonNode>,
}

impl JsonNode {
    /// Converts `node` and everything below it.
    fn from_node(node: NodeRef<'_>) -> Self {
        Self {
            title: node.title.clone(),
            author: (!node.author.is_empty()).then(|| node.author.clone()),
            media_id: node.media_id.clone(),
            line: node.line,
            children: node.children().map(Self::from_node).collect(),
        }
    }
}

/// Prints the outline tree.
pub fn run(ctx: &CommandContext, output: &OutputArgs) -> ExitCode {
    let tree = match ctx.annotations() {
        Ok(tree) => tree,
        Err(code) => return code,
    };

    if output.json {
        let roots: Vec<JsonNode> = tree.roots().map(JsonNode::from_node).collect();
        return print_json(&roots);
    }

    for line in render(&tree) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

/// Renders one line per node, indented two spaces per level.
fn render(tree: &Annotations) -> Vec<String> {
    tree.iter_preorder()
        .map(|node| {
            let indent = "  ".repeat(node.ancestors().count());
            let mut line = indent;
            if let Some(id) = &node.media_id {
                line.push_str(&media_id(id));
                line.push(' ');
            }
            line.push_str(&node.title);
            if !node.author.is_empty() {
                line.push(' ');
                line.push_str(&author(&format!("[{}]", node.author)));
            }
            line
        })
        .collect()
}
