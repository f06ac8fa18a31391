//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - resolves the input file (argument or interactive picker)
//! - runs the analysis pipeline and writes the report
//! - prints the summary and output path

use clap::Parser;
use tracing::debug;

use crate::classify::{assign_branch, classify_activity, extract_date};
use crate::cli::{AnalyzeArgs, ClassifyArgs, Command};
use crate::domain::{AnalyzeConfig, DateWindow, default_output_path};
use crate::error::{AppError, EXIT_INPUT};

pub mod pipeline;

/// Entry point for the `wechat-analyzer` binary.
pub fn run() -> Result<(), AppError> {
    // Window defaults may come from `.env`; a missing file is fine.
    dotenvy::dotenv().ok();

    // `wechat-analyzer` and `wechat-analyzer file.csv` behave like
    // `wechat-analyzer analyze ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::telemetry::init(&cli.log_level)?;

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Classify(args) => handle_classify(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let input = match &args.file {
        Some(path) => path.clone(),
        None => crate::cli::picker::prompt_for_csv_path()?,
    };
    let config = analyze_config_from_args(&args, input)?;
    debug!(?config, "resolved configuration");

    let run = pipeline::analyze_file(&config)?;

    if !config.quiet {
        println!("{}", crate::report::format_run_summary(&run.bundle));
    }
    println!("{}", crate::report::format_output_path(&run.output_path));

    Ok(())
}

fn handle_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let title = Some(args.title.as_str());
    let summary = args.summary.as_deref();

    let activity = classify_activity(title, summary);
    let branch = assign_branch(title, summary, args.account.as_deref());
    let date = extract_date(args.published.as_deref(), summary);

    println!("活动类型: {activity}");
    println!("分支机构: {branch}");
    match date {
        Some(d) => println!("有效日期: {}", d.format("%Y-%m-%d %H:%M:%S")),
        None => println!("有效日期: -"),
    }
    Ok(())
}

pub fn analyze_config_from_args(args: &AnalyzeArgs, input: std::path::PathBuf) -> Result<AnalyzeConfig, AppError> {
    let defaults = DateWindow::default();
    let start = args.from.unwrap_or(defaults.start);
    let end = args.to.unwrap_or(defaults.end);
    let window = DateWindow::new(start, end)
        .ok_or_else(|| AppError::new(EXIT_INPUT, format!("Empty date window: --from {start} is after --to {end}.")))?;

    let output = args.output.clone().unwrap_or_else(|| default_output_path(&input));

    Ok(AnalyzeConfig {
        input,
        output,
        window,
        export_json: args.export_json.clone(),
        quiet: args.quiet,
    })
}

/// Rewrite argv so a bare invocation defaults to `analyze`.
///
/// Rules:
/// - `wechat-analyzer`                      -> `wechat-analyzer analyze`
/// - `wechat-analyzer a.csv ...`            -> `wechat-analyzer analyze a.csv ...`
/// - `wechat-analyzer --quiet ...`          -> `wechat-analyzer analyze --quiet ...`
/// - `wechat-analyzer --help/--version/-h`  -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "classify");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}
