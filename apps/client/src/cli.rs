//! Command-line arguments.

use clap::{Parser, Subcommand};
use entities::Mood;

/// `newyear` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "newyear",
    about = "Pick a mood and count down to the new year",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The command to run, `start` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Start)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Continue from wherever the session stands
    Start,
    /// Register a name
    Enter {
        /// Register this name instead of prompting
        #[arg(long, value_name = "name")]
        name: Option<String>,
    },
    /// Pick a mood
    Mood {
        /// Pick this mood instead of prompting
        #[arg(value_parser = parse_mood)]
        mood: Option<Mood>,
    },
    /// Show the countdown
    Experience,
    /// Go back to mood selection, keeping the current mood until a new pick
    ChangeMood,
    /// Print what the session holds
    Status,
    /// Forget the session
    Reset,
}

fn parse_mood(raw: &str) -> Result<Mood, String> {
    Mood::parse(&raw.to_lowercase())
        .ok_or_else(|| format!("expected one of: {}", Mood::expected_values()))
}
