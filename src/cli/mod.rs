//! Command-line parsing for the article analyzer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! classification and reporting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "wechat-analyzer",
    version,
    about = "Classify alumni-association articles and build a branch/activity report"
)]
pub struct Cli {
    /// Log filter used when `RUST_LOG` is not set (e.g. `info`, `debug`).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze an article CSV and write `<name>_分析结果.xlsx` next to it.
    Analyze(AnalyzeArgs),
    /// Classify a single article given on the command line.
    Classify(ClassifyArgs),
}

/// Options for a full analysis run.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Article CSV. When omitted, pick one interactively from the current directory.
    #[arg(value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Report path (defaults to `<dir>/<stem>_分析结果.xlsx`).
    #[arg(short, long, value_name = "XLSX")]
    pub output: Option<PathBuf>,

    /// First day of the date window (inclusive).
    #[arg(long, env = "WECHAT_ANALYZER_FROM", value_parser = parse_cli_date)]
    pub from: Option<NaiveDate>,

    /// Last day of the date window (inclusive).
    #[arg(long, env = "WECHAT_ANALYZER_TO", value_parser = parse_cli_date)]
    pub to: Option<NaiveDate>,

    /// Also export the aggregate views as JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Only print the output path.
    #[arg(short, long)]
    pub quiet: bool,
}

/// A single article's fields.
#[derive(Debug, Args, Clone)]
pub struct ClassifyArgs {
    /// Article title.
    #[arg(long)]
    pub title: String,

    /// Article summary.
    #[arg(long)]
    pub summary: Option<String>,

    /// Publishing account (author column).
    #[arg(long)]
    pub account: Option<String>,

    /// Publish time as exported (e.g. `2024-06-15 10:00:00`).
    #[arg(long)]
    pub published: Option<String>,
}

fn parse_cli_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| format!("Invalid date '{s}'. Expected YYYY-MM-DD."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_parses_window_flags() {
        let cli = Cli::parse_from([
            "wechat-analyzer",
            "analyze",
            "articles.csv",
            "--from",
            "2024-01-01",
            "--to",
            "2024-12-31",
            "--quiet",
        ]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.file, Some(PathBuf::from("articles.csv")));
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(args.to, NaiveDate::from_ymd_opt(2024, 12, 31));
        assert!(args.quiet);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn bad_date_flag_is_rejected() {
        let res = Cli::try_parse_from(["wechat-analyzer", "analyze", "--from", "2024/01/01"]);
        assert!(res.is_err());
    }

    #[test]
    fn classify_requires_title() {
        assert!(Cli::try_parse_from(["wechat-analyzer", "classify"]).is_err());
        let cli = Cli::try_parse_from(["wechat-analyzer", "classify", "--title", "春茗"]).unwrap();
        assert!(matches!(cli.command, Command::Classify(_)));
    }
}
