//! Command-line interface for cl-media-tools.
//!
//! This module provides the CLI structure for the `clmt` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{CallCommand, ConfigCommand, ServeCommand, StatusCommand};

use crate::logging::Verbosity;

/// clmt - Query the host platform version over a method channel
///
/// Registers the version handler on its channel and lets you send it calls,
/// either one at a time or as line-delimited JSON on stdin.
#[derive(Debug, Parser)]
#[command(name = "clmt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one method call and print the reply
    Call(CallCommand),

    /// Answer JSON method calls read line by line from stdin
    Serve(ServeCommand),

    /// Show the channel and what the host reports
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "clmt");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_call() {
        let cli = Cli::try_parse_from(["clmt", "call", "getPlatformVersion"]).unwrap();
        match cli.command {
            Command::Call(cmd) => {
                assert_eq!(cmd.method, "getPlatformVersion");
                assert!(cmd.args.is_none());
                assert!(cmd.channel.is_none());
                assert!(!cmd.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_call_with_options() {
        let cli = Cli::try_parse_from([
            "clmt",
            "call",
            "foo",
            "--args",
            "{\"a\":1}",
            "--channel",
            "other",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Call(cmd) => {
                assert_eq!(cmd.args.as_deref(), Some("{\"a\":1}"));
                assert_eq!(cmd.channel.as_deref(), Some("other"));
                assert!(cmd.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_call_requires_method() {
        assert!(Cli::try_parse_from(["clmt", "call"]).is_err());
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["clmt", "serve", "--channel", "x"]).unwrap();
        assert!(matches!(cli.command, Command::Serve(ServeCommand { channel: Some(_) })));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["clmt", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["clmt", "status", "-vv", "-c", "/tmp/clmt.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/clmt.toml")));
        assert_eq!(cli.verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_quiet_wins() {
        let cli = Cli::try_parse_from(["clmt", "-q", "-v", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
