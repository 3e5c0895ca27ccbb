//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formwire",
    version,
    about = "Run declarative form enhancements against a page",
    long_about = "Load form markup, wire its data-depends declarations, row templates,\n\
                  drop zones and field actions, and inspect or drive the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// JSON file overriding enhancement options (class names, separators).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enhance a page and report what was wired.
    Check(CheckArgs),

    /// Enhance a page, replay a script of user events and print the result.
    Simulate(SimulateArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Markup file containing one or more forms.
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,
}

#[derive(Parser)]
pub struct SimulateArgs {
    /// Markup file containing one or more forms.
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    /// JSON list of steps to replay.
    #[arg(long = "script", value_name = "JSON")]
    pub script: PathBuf,

    /// Also print the resulting markup.
    #[arg(long = "markup")]
    pub markup: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
