//! formwire CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use formwire_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use formwire_cli::commands::{run_check, run_simulate};
use formwire_cli::config::load_options;
use formwire_cli::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let options = match load_options(cli.config.as_deref()) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match &cli.command {
        Command::Check(args) => match run_check(args, options) {
            Ok(has_errors) => i32::from(has_errors),
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Simulate(args) => match run_simulate(args, options) {
            Ok(_) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
///
/// `--log-level` wins over `-v`/`-q`; either one disables `RUST_LOG`. Log
/// files get timestamps, and debug output names the emitting module.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_timestamps(cli.log_file.is_some())
        .with_target(level_filter >= LevelFilter::DEBUG)
        .with_ansi(with_ansi);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse arguments")
    }

    #[test]
    fn defaults_follow_rust_log() {
        let config = log_config_from_cli(&parse(&["formwire", "check", "page.html"]));
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.with_timestamps);
        assert!(!config.with_target);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn explicit_level_beats_verbosity() {
        let config = log_config_from_cli(&parse(&[
            "formwire",
            "-v",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "check",
            "page.html",
        ]));
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
        assert!(config.with_target);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn log_file_gets_timestamps_without_color() {
        let config = log_config_from_cli(&parse(&[
            "formwire",
            "--log-file",
            "run.log",
            "check",
            "page.html",
        ]));
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert!(config.with_timestamps);
        assert!(!config.with_ansi);
    }
}
