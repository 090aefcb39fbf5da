//! CLI command definitions and handlers.

pub mod detect;
pub mod watch;

use clap::{Parser, Subcommand};

/// Hands Off - alert when a hand touches your mouth
#[derive(Parser)]
#[command(name = "hands-off")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared watch arguments (recording, frames, thresholds, flags).
    #[command(flatten)]
    pub watch: watch::WatchArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Replay a landmark recording through the detector and alert
    Watch(watch::WatchArgs),
    /// Check a single recorded frame for a hand near the mouth
    Detect(detect::DetectArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// No hand came near the mouth.
    Success = 0,
    /// At least one alert was raised.
    AlertRaised = 1,
    /// Invalid input or detection unavailable.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Shared `0.0..=1.0` validation for `--threshold`.
pub fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
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
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("0.1"), Ok(0.1));
        assert_eq!(parse_threshold("1"), Ok(1.0));
        assert!(parse_threshold("1.5").is_err());
        assert!(parse_threshold("-0.1").is_err());
        assert!(parse_threshold("near").is_err());
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as u8, 0);
        assert_eq!(ExitCode::AlertRaised as u8, 1);
        assert_eq!(ExitCode::Error as u8, 2);
    }
}
