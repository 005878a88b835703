// CLI interface
pub mod commands;

use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jekin")]
#[command(about = "Track phone check-in windows for itinerary flights", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Read the itinerary from a JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Fetch the itinerary from this endpoint
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate every leg once and print the result
    Status {
        #[command(flatten)]
        source: SourceArgs,

        /// Evaluate as of this local time ("YYYY-MM-DD HH:MM:SS") instead of now
        #[arg(long)]
        at: Option<String>,

        /// Output in JSON format for scripting
        #[arg(long)]
        json: bool,
    },

    /// Keep the status on screen, refreshing on a fixed interval
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Override the configured refresh interval (seconds)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Show the check-in window for a single departure
    Window {
        /// Departure in local time ("YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        departure: String,

        /// Use the domestic lead time instead of the international one
        #[arg(long)]
        domestic: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completion scripts
    ///
    /// INSTALLATION:
    ///
    /// Bash:
    ///   eval "$(jekin completions bash)"    # Add to ~/.bashrc
    ///
    /// Zsh:
    ///   eval "$(jekin completions zsh)"     # Add to ~/.zshrc
    ///
    /// Fish:
    ///   jekin completions fish > ~/.config/fish/completions/jekin.fish
    ///
    /// PowerShell:
    ///   jekin completions powershell | Out-String | Invoke-Expression
    ///
    /// Elvish:
    ///   eval (jekin completions elvish | slurp)
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommand {
    /// Write a commented sample config file
    Init,
    /// Show where the config file lives and what it resolves to
    Path,
}

#[derive(Debug, Clone, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Cli {
    pub fn is_watch(&self) -> bool {
        matches!(self.command, Commands::Watch { .. })
    }
}

pub async fn execute(args: Cli) -> Result<()> {
    match args.command {
        Commands::Status { source, at, json } => commands::status::execute(source, at, json).await,
        Commands::Watch { source, interval } => commands::watch::execute(source, interval).await,
        Commands::Window {
            departure,
            domestic,
        } => commands::window::execute(departure, domestic),
        Commands::Config { command } => commands::config::execute(command),
        Commands::Completions { shell } => {
            commands::completions::execute(shell);
            Ok(())
        }
    }
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
    fn test_parse_status_with_at() {
        let cli = Cli::try_parse_from([
            "jekin",
            "status",
            "--file",
            "legs.json",
            "--at",
            "2025-06-15 12:00:00",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Status { source, at, json } => {
                assert_eq!(source.file, Some(PathBuf::from("legs.json")));
                assert_eq!(at.as_deref(), Some("2025-06-15 12:00:00"));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_watch_flag() {
        let cli = Cli::try_parse_from(["jekin", "-v", "watch", "--file", "legs.json"]).unwrap();
        assert!(cli.is_watch());
        assert!(cli.verbose);
    }
}
