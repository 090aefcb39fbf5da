//! Edge-triggered alert state machine.
//!
//! | current    | detected | next       | play sound |
//! |------------|----------|------------|------------|
//! | Monitoring | false    | Monitoring | no         |
//! | Monitoring | true     | Alerting   | yes        |
//! | Alerting   | true     | Alerting   | no         |
//! | Alerting   | false    | Monitoring | no         |

use crate::domain::AlertState;

/// Computes the next alert state and whether the sound should play.
///
/// The sound fires only on a rising edge of `detected`.
#[must_use]
pub const fn advance(current: AlertState, detected: bool) -> (AlertState, bool) {
    match (current, detected) {
        (AlertState::Monitoring, true) => (AlertState::Alerting, true),
        (AlertState::Alerting, true) => (AlertState::Alerting, false),
        (_, false) => (AlertState::Monitoring, false),
    }
}

/// Owns the alert state for one session.
#[derive(Debug, Default)]
pub struct AlertMachine {
    state: AlertState,
}

impl AlertMachine {
    /// Creates a machine in [`AlertState::Monitoring`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AlertState::Monitoring,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AlertState {
        self.state
    }

    /// Feeds one detection result. Returns true when the sound should play.
    pub fn step(&mut self, detected: bool) -> bool {
        let (next, play_sound) = advance(self.state, detected);
        self.state = next;
        play_sound
    }

    /// Returns to [`AlertState::Monitoring`] without side effects.
    pub fn reset(&mut self) {
        self.state = AlertState::Monitoring;
    }
}
