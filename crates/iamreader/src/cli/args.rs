//! Clap argument definitions for the `iamreader` CLI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "iamreader")]
#[command(version)]
#[command(about = "Outline-driven companion for audiobook narration")]
pub struct Cli {
    /// Flags accepted by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Show debug messages
    #[arg(long, global = true)]
    pub debug: bool,

    /// Index file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub index: Option<PathBuf>,
}

/// Shared output mode flag.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `iamreader lookup`.
#[derive(Args, Debug, Clone)]
pub struct LookupCommand {
    /// Media id, e.g. 01_ch1
    pub id: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `iamreader tags`.
#[derive(Args, Debug, Clone)]
pub struct TagsCommand {
    /// Release year to stamp [default: current year]
    #[arg(long)]
    pub year: Option<i32>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `iamreader template`.
#[derive(Args, Debug, Clone)]
pub struct TemplateCommand {
    /// Publishing service name as used in the ledger, e.g. youtube
    pub service: String,

    /// Date to schedule from when nothing is published yet [default: today]
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

/// Parses a calendar date argument.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Supported `iamreader` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the outline tree
    Tree(OutputArgs),

    /// Show the index entry bound to a media id
    Lookup(LookupCommand),

    /// Pair media files in the audio directory with index entries
    Match(OutputArgs),

    /// Show the audio tags each media file would get
    Tags(TagsCommand),

    /// Show the caption and output paths for each media file
    Captions(OutputArgs),

    /// Print the next publishing records for a service as JSON
    Template(TemplateCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["iamreader", "tree", "--debug", "--index", "alt/index.txt"]);
        assert!(cli.global.debug);
        assert_eq!(cli.global.index, Some(PathBuf::from("alt/index.txt")));
        assert!(matches!(cli.command, Commands::Tree(OutputArgs { json: false })));
    }

    #[test]
    fn lookup_takes_id_and_json() {
        let cli = parse(&["iamreader", "lookup", "xx_ch2a", "--json"]);
        match cli.command {
            Commands::Lookup(cmd) => {
                assert_eq!(cmd.id, "xx_ch2a");
                assert!(cmd.output.json);
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn template_parses_today() {
        let cli = parse(&["iamreader", "template", "youtube", "--today", "2024-03-01"]);
        match cli.command {
            Commands::Template(cmd) => {
                assert_eq!(cmd.service, "youtube");
                assert_eq!(cmd.today, NaiveDate::from_ymd_opt(2024, 3, 1));
            }
            _ => panic!("expected template"),
        }
    }

    #[test]
    fn template_rejects_bad_date() {
        assert!(
            Cli::try_parse_from(["iamreader", "template", "yt", "--today", "03/01/2024"]).is_err()
        );
    }

    #[test]
    fn lookup_requires_id() {
        assert!(Cli::try_parse_from(["iamreader", "lookup"]).is_err());
    }
}
