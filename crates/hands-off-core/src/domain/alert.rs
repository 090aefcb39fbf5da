//! Alert state and its on-screen projection.

use serde::{Deserialize, Serialize};

/// Whether the user is currently being alerted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    /// No hand near the mouth.
    #[default]
    Monitoring,
    /// A hand is near the mouth; the sound has already played.
    Alerting,
}

impl AlertState {
    /// Returns true while alerting.
    #[must_use]
    pub const fn is_alerting(self) -> bool {
        matches!(self, Self::Alerting)
    }

    /// What the presentation layer shows for this state.
    #[must_use]
    pub const fn status(self) -> StatusView {
        match self {
            Self::Monitoring => StatusView {
                headline: "Monitoring...",
                color: StatusColor::Green,
                emphasis: Emphasis::Thin,
            },
            Self::Alerting => StatusView {
                headline: "Hands off your mouth!",
                color: StatusColor::Red,
                emphasis: Emphasis::Bold,
            },
        }
    }
}

/// Status line contents for one alert state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView {
    /// Text to display.
    pub headline: &'static str,
    /// Text color.
    pub color: StatusColor,
    /// Font weight.
    pub emphasis: Emphasis,
}

/// Status text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    /// Calm.
    Green,
    /// Alarm.
    Red,
}

impl StatusColor {
    /// sRGB components.
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Self::Green => [0x00, 0xff, 0x00],
            Self::Red => [0xff, 0x00, 0x00],
        }
    }
}

/// Status text weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Small, thin text.
    Thin,
    /// Large, bold text.
    Bold,
}
