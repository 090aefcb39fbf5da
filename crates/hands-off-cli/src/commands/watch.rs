//! Watch command - replay a landmark recording through a detection session.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use hands_off_adapters::{
    BlankFrameSource, FramePacer, FsFrameSource, LandmarkRecording, RecordedLandmarks,
    SilentAlert, TerminalBell, YuvPreprocessor,
};
use hands_off_core::{
    AlertSink, DiscardEvents, FrameEventSink, FrameSource, ProximityConfig, Rotation, Session,
    SessionConfig, SessionParts, SessionStats,
};
use tracing::{debug, info};

use super::{parse_threshold, ExitCode};
use crate::config::AppConfig;
use crate::output::{JsonEventOutput, StatusLine};

/// Where per-frame events go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EventFormat {
    /// JSON Lines on stdout (one event per line)
    #[default]
    Jsonl,
    /// No event output
    None,
}

/// Hardcoded default values.
mod defaults {
    pub const FPS: f64 = 30.0;
    /// Size of the placeholder frames used when no images are given.
    pub const BLANK_WIDTH: u32 = 64;
    pub const BLANK_HEIGHT: u32 = 48;
}

/// Parse and validate a frame rate.
fn parse_fps(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive frame rate"))
    }
}

/// Parse and validate a rotation in degrees.
fn parse_rotation(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid angle"))?;
    Rotation::from_degrees(value)
        .map(|_| value)
        .ok_or_else(|| format!("{value} is not one of 0, 90, 180, 270"))
}

/// Shared arguments for replaying a recording.
#[derive(Args, Clone, Default)]
pub struct WatchArgs {
    /// Landmark recording (JSON Lines, one frame per line)
    pub recording: Option<PathBuf>,

    /// Directory of captured frame images to replay alongside the recording
    #[arg(long, value_name = "DIR")]
    pub frames: Option<PathBuf>,

    /// Replay rate in frames per second
    #[arg(long, value_parser = parse_fps)]
    pub fps: Option<f64>,

    /// Replay as fast as possible, ignoring --fps
    #[arg(long)]
    pub no_pacing: bool,

    /// Clockwise sensor rotation of the frame images (0, 90, 180, 270)
    #[arg(long, value_parser = parse_rotation)]
    pub rotation: Option<u32>,

    /// Fingertip-to-mouth distance threshold (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f32>,

    /// Do not ring the terminal bell on alerts
    #[arg(long)]
    pub no_sound: bool,

    /// Show the live status line
    #[arg(long)]
    pub status: bool,

    /// Suppress the status line
    #[arg(short, long)]
    pub quiet: bool,

    /// Event output format
    #[arg(long, value_enum)]
    pub format: Option<EventFormat>,

    /// Whether sound is enabled after layering (populated by `with_config`).
    #[arg(skip)]
    sound: Option<bool>,
}

impl WatchArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.threshold = args.threshold.or(config.detection.threshold);
        args.fps = args.fps.or(config.capture.fps);
        args.rotation = args.rotation.or(config.capture.rotation);

        // CLI --no-sound always wins, then config, then default (on)
        args.sound = Some(!args.no_sound && config.alert.sound.unwrap_or(true));

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "jsonl" => Some(EventFormat::Jsonl),
                    "none" => Some(EventFormat::None),
                    _ => None,
                });
        }

        if !args.status {
            args.status = config.output.status.unwrap_or(false);
        }

        args
    }

    /// Get threshold with fallback to the detector default.
    pub fn threshold(&self) -> f32 {
        self.threshold.unwrap_or(hands_off_core::DEFAULT_THRESHOLD)
    }

    fn pacer(&self) -> FramePacer {
        if self.no_pacing {
            FramePacer::unpaced()
        } else {
            FramePacer::new(self.fps.unwrap_or(defaults::FPS))
        }
    }

    fn rotation(&self) -> Rotation {
        self.rotation
            .and_then(Rotation::from_degrees)
            .unwrap_or_default()
    }

    fn sound(&self) -> bool {
        self.sound.unwrap_or(!self.no_sound)
    }

    /// Get event format with fallback to JSONL.
    pub fn format(&self) -> EventFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the watch command.
pub struct WatchResult {
    /// Session counters.
    #[allow(dead_code)] // Exposed for programmatic use
    pub stats: SessionStats,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the watch command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &WatchArgs) -> Result<WatchResult> {
    let Some(recording_path) = args.recording.as_deref() else {
        anyhow::bail!("No recording specified");
    };

    let recording = LandmarkRecording::load(recording_path)?;
    info!(
        "Replaying {} recorded frames from {}",
        recording.len(),
        recording_path.display()
    );

    let source: Box<dyn FrameSource> = match args.frames.as_deref() {
        Some(dir) => {
            let frames = FsFrameSource::open(dir)?
                .with_rotation(args.rotation())
                .with_pacer(args.pacer());
            if frames.len() != recording.len() {
                tracing::warn!(
                    "{} frame images but {} recorded frames",
                    frames.len(),
                    recording.len()
                );
            }
            Box::new(frames)
        }
        None => Box::new(
            BlankFrameSource::new(
                defaults::BLANK_WIDTH,
                defaults::BLANK_HEIGHT,
                recording.len() as u64,
            )
            .with_pacer(args.pacer()),
        ),
    };

    let audio: Box<dyn AlertSink> = if args.sound() {
        Box::new(TerminalBell)
    } else {
        Box::new(SilentAlert)
    };

    let events: Arc<dyn FrameEventSink> = match args.format() {
        EventFormat::Jsonl => Arc::new(JsonEventOutput::stdout()),
        EventFormat::None => Arc::new(DiscardEvents),
    };

    let config = SessionConfig {
        proximity: ProximityConfig {
            threshold: args.threshold(),
        },
    };
    debug!("Session config: {config:?}");

    let backend = RecordedLandmarks::new(recording);
    let session = Session::start(
        config,
        &backend,
        SessionParts {
            source,
            preprocessor: Box::new(YuvPreprocessor::new()),
            audio,
            events,
        },
    )
    .context("Hand-to-mouth detection is unavailable")?;

    let show_status = !args.quiet && (args.status || std::io::stderr().is_terminal());
    let status_line = StatusLine::spawn(session.status(), show_status);

    let stats = session.join()?;
    status_line.finish();

    let exit_code = if stats.alerts > 0 {
        ExitCode::AlertRaised
    } else {
        ExitCode::Success
    };

    Ok(WatchResult { stats, exit_code })
}
