//! Configuration file support for hands-off.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/hands-off/config.toml` (lowest priority)
//! - Project-local: `.hands-off.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Proximity detection settings.
    pub detection: DetectionConfig,
    /// Frame capture settings.
    pub capture: CaptureConfig,
    /// Alert sound settings.
    pub alert: AlertConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Proximity detection configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Fingertip-to-mouth distance threshold (0.0-1.0, normalized units).
    pub threshold: Option<f32>,
}

/// Frame capture configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Replay rate in frames per second.
    pub fps: Option<f64>,
    /// Clockwise sensor rotation in degrees (0, 90, 180, 270).
    pub rotation: Option<u32>,
}

/// Alert sound configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Ring the terminal bell on each alert.
    pub sound: Option<bool>,
}

/// Output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Event output: "jsonl" or "none".
    pub format: Option<String>,
    /// Show the live status line.
    pub status: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/hands-off/config.toml`
    /// 2. Project-local: `.hands-off.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Files that fail to parse or hold
    /// invalid values are skipped with a warning.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_valid_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_valid_file(&project_path) {
                config.merge(project_config);
            }
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.detection.threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!("detection.threshold must be 0.0-1.0, got {t}"));
            }
        }

        if let Some(fps) = self.capture.fps {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(format!("capture.fps must be positive, got {fps}"));
            }
        }
        if let Some(r) = self.capture.rotation {
            if !matches!(r, 0 | 90 | 180 | 270) {
                return Err(format!(
                    "capture.rotation must be 0, 90, 180 or 270, got {r}"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "jsonl" && f != "none" {
                return Err(format!(
                    "output.format must be 'jsonl' or 'none', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.detection.threshold = other.detection.threshold.or(self.detection.threshold);

        self.capture.fps = other.capture.fps.or(self.capture.fps);
        self.capture.rotation = other.capture.rotation.or(self.capture.rotation);

        self.alert.sound = other.alert.sound.or(self.alert.sound);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.status = other.output.status.or(self.output.status);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hands-off").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.hands-off.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".hands-off.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load, parse and validate a TOML config file.
fn load_valid_file(path: &Path) -> Option<AppConfig> {
    let config = load_file(path)?;
    match config.validate() {
        Ok(()) => Some(config),
        Err(e) => {
            warn!("Ignoring config file {}: {e}", path.display());
            eprintln!("warning: ignoring {}: {e}", path.display());
            None
        }
    }
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
