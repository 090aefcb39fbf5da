//! Detect command - check one recorded frame for a hand near the mouth.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use hands_off_adapters::load_frame;
use hands_off_core::{ProximityConfig, ProximityDetector};
use serde::Serialize;
use tracing::info;

use super::{parse_threshold, ExitCode};
use crate::config::AppConfig;

/// Arguments for the detect command.
#[derive(Args, Clone)]
pub struct DetectArgs {
    /// Recorded frame (a single JSON object with "hands" and "faces")
    pub frame: PathBuf,

    /// Fingertip-to-mouth distance threshold (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f32>,
}

impl DetectArgs {
    /// Apply configuration file values, respecting CLI precedence.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.threshold = args.threshold.or(config.detection.threshold);
        args
    }
}

/// Detection verdict printed on stdout.
#[derive(Debug, Serialize)]
struct Verdict {
    hand_near_mouth: bool,
    hands: usize,
    faces: usize,
    threshold: f32,
}

/// Run the detect command.
pub fn run(args: &DetectArgs) -> Result<ExitCode> {
    let frame = load_frame(&args.frame)?;
    let mut config = ProximityConfig::default();
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    let detector = ProximityDetector::new(config);

    let near = detector.detect(&frame.hands, &frame.faces);
    info!(
        "{}: {} hand(s), {} face(s), hand near mouth: {near}",
        args.frame.display(),
        frame.hands.len(),
        frame.faces.len()
    );

    let verdict = Verdict {
        hand_near_mouth: near,
        hands: frame.hands.len(),
        faces: frame.faces.len(),
        threshold: detector.threshold(),
    };
    println!("{}", serde_json::to_string(&verdict)?);

    Ok(if near {
        ExitCode::AlertRaised
    } else {
        ExitCode::Success
    })
}
