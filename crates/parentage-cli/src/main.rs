//! # parentage CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use parentage_cli::check::{run_check, CheckArgs};
use parentage_cli::show::{run_show, ShowArgs};

/// Parentage: module parent checker.
///
/// Walks a multi-module project tree and fails when any module declares a
/// parent other than the aggregator that lists it.
#[derive(Parser, Debug)]
#[command(name = "parentage", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that every module declares its aggregator as parent.
    Check(CheckArgs),

    /// Show a descriptor's effective coordinates and expected module parent.
    Show(ShowArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level; RUST_LOG applies when quiet.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("parentage CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check(args) => run_check(&args, config),
        Commands::Show(args) => run_show(&args, config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_check_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["parentage", "check"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("."));
            assert!(args.file_name.is_none());
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_parse_check_with_path_and_file_name() {
        let cli = Cli::try_parse_from([
            "parentage",
            "check",
            "services",
            "--file-name",
            "module.yaml",
        ])
        .unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("services"));
            assert_eq!(args.file_name.as_deref(), Some("module.yaml"));
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_parse_show_json() {
        let cli = Cli::try_parse_from(["parentage", "show", "api", "--json"]).unwrap();
        if let Commands::Show(args) = cli.command {
            assert!(args.json);
            assert_eq!(args.path, PathBuf::from("api"));
        } else {
            panic!("expected show");
        }
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["parentage", "check"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["parentage", "-vv", "check"]).unwrap();
        assert_eq!(cli2.verbose, 2);
    }

    #[test]
    fn cli_parse_global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["parentage", "check", "--config", "parentage.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("parentage.yaml")));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["parentage"]).is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["parentage", "build"]).is_err());
    }
}
