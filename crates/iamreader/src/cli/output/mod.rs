//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
pub use iamreader_highlight::{
    Highlighter, author, dim, error, header, media_id, rule, subheader, success, warning,
};
use serde::Serialize;

/// Serializes `value` as pretty JSON on stdout.
///
/// Output is syntax highlighted when stdout is a terminal.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json_str) => {
            if io::stdout().is_terminal() {
                println!("{}", Highlighter::new().highlight_json(&json_str));
            } else {
                println!("{json_str}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Creates a table in the CLI's house style with the given header row.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(headers.to_vec());
    table
}

/// Text shown for a missing value in tables.
pub const NONE: &str = "-";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_renders_header_and_rows() {
        let mut t = table(&["File", "Title"]);
        t.add_row(vec!["01_ch1", "Chapter One"]);
        let rendered = t.to_string();
        assert!(rendered.contains("File"));
        assert!(rendered.contains("Chapter One"));
    }
}
