//! Command-line interface structure of the `mixte` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use mixte_core::logging::Verbosity;

pub use commands::{CalcCommand, ConfigCommand, CourseArg, GateCommand, LoginCommand, ProtectCommand, WhoamiCommand};

/// mixte - Construction Mixte course tools
///
/// Log in to the course, check pages against the access gate and run the
/// Eurocode 4 calculators from the terminal.
#[derive(Debug, Parser)]
#[command(name = "mixte")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open a session (valid 7 days by default)
    Login(LoginCommand),

    /// Remove the session
    Logout,

    /// Show the current session
    Whoami(WhoamiCommand),

    /// Access gate checks
    #[command(subcommand)]
    Gate(GateCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Course calculators
    #[command(subcommand)]
    Calc(CalcCommand),

    /// Content protection rules
    #[command(subcommand)]
    Protect(ProtectCommand),
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "mixte");
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["mixte", "-q", "logout"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
        let cli = Cli::try_parse_from(["mixte", "-vv", "logout"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from([
            "mixte",
            "login",
            "--last-name",
            "Durand",
            "--first-name",
            "Marie",
            "-e",
            "marie@esup.fr",
        ])
        .unwrap();
        match cli.command {
            Command::Login(login) => {
                assert_eq!(login.last_name.as_deref(), Some("Durand"));
                assert_eq!(login.email.as_deref(), Some("marie@esup.fr"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_calc_run() {
        let cli = Cli::try_parse_from([
            "mixte",
            "calc",
            "run",
            "slab-shear",
            "--set",
            "deck=cofraplus60_088",
            "-s",
            "hc_mm=80",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Calc(CalcCommand::Run { kind, values, json }) => {
                assert_eq!(kind, "slab-shear");
                assert_eq!(values, ["deck=cofraplus60_088", "hc_mm=80"]);
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_gate_and_config() {
        let cli = Cli::try_parse_from(["mixte", "-c", "/tmp/m.toml", "gate", "check", "/cours/x.html"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/m.toml")));
        assert!(matches!(cli.command, Command::Gate(GateCommand::Check { .. })));
        assert!(Cli::try_parse_from(["mixte", "gate", "encode"]).is_err());
        let cli = Cli::try_parse_from(["mixte", "config", "show", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Show { json: true })));
    }

    #[test]
    fn test_parse_calc_list_course() {
        let cli = Cli::try_parse_from(["mixte", "calc", "list", "--course", "columns"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Calc(CalcCommand::List {
                course: Some(CourseArg::Columns)
            })
        ));
    }

    #[test]
    fn test_parse_protect_check() {
        let cli = Cli::try_parse_from(["mixte", "protect", "check", "Ctrl+C", "--input"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Protect(ProtectCommand::Check { input: true, .. })
        ));
    }
}
