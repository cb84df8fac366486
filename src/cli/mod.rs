//! Command-line interface.

pub mod commands;
pub mod display;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::breakdown::BreakdownArgs;
use commands::progress::ProgressArgs;
use commands::prompt::PromptArgs;
use commands::templates::TemplatesArgs;

#[derive(Parser, Debug)]
#[command(name = "goalsplit")]
#[command(about = "Break macro goals down into ordered, time-boxed micro-goals", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Config file to load instead of .goalsplit/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Break a goal down into micro-goals
    Breakdown(BreakdownArgs),
    /// List the fallback micro-goal templates
    Templates(TemplatesArgs),
    /// Print the prompt that would be sent to the provider
    Prompt(PromptArgs),
    /// Toggle or edit micro-goals in a saved breakdown and show progress
    Progress(ProgressArgs),
}

/// Report a command error and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_breakdown_with_global_flags() {
        let cli = Cli::try_parse_from([
            "goalsplit",
            "breakdown",
            "Run a 5k",
            "--type",
            "habit",
            "--category",
            "fitness",
            "--offline",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Breakdown(args) => {
                assert!(args.offline);
                assert_eq!(args.goal.title.as_deref(), Some("Run a 5k"));
                assert_eq!(args.goal.category.as_deref(), Some("fitness"));
            }
            other => panic!("expected breakdown, got {other:?}"),
        }
    }

    #[test]
    fn test_breakdown_timeout_must_be_positive() {
        let parse =
            |secs: &str| Cli::try_parse_from(["goalsplit", "breakdown", "Run", "--timeout", secs]);
        assert!(parse("0").is_err());

        let cli = parse("120").unwrap();
        match cli.command {
            Commands::Breakdown(args) => assert_eq!(args.timeout, Some(120)),
            other => panic!("expected breakdown, got {other:?}"),
        }
    }
}
