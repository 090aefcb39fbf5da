//! Hands Off CLI - alert when a hand touches your mouth.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{detect::DetectArgs, watch::WatchArgs, Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let exit_code = match cli.command {
        Some(Commands::Watch(args)) => watch(WatchArgs::with_config(args, &config)),
        Some(Commands::Detect(args)) => {
            match commands::detect::run(&DetectArgs::with_config(args, &config)) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    ExitCode::Error
                }
            }
        }
        None => {
            // Default behavior: watch with flattened args
            if cli.watch.recording.is_none() {
                eprintln!("error: No recording specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            watch(WatchArgs::with_config(cli.watch, &config))
        }
    };

    exit_code.into()
}

fn watch(args: WatchArgs) -> ExitCode {
    match commands::watch::run(&args) {
        Ok(result) => result.exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
