//! Live status line using indicatif.
//!
//! Runs on its own thread and follows the session's status channel, so the
//! worker never waits on the terminal.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use hands_off_core::domain::{Emphasis, StatusColor, StatusView};
use hands_off_core::{AlertState, StatusWatcher};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

const TICK: Duration = Duration::from_millis(100);

/// Presenter thread drawing the current alert state on stderr.
pub struct StatusLine {
    handle: Option<JoinHandle<()>>,
}

impl StatusLine {
    /// Starts following `watcher`. When `enabled` is false nothing is drawn.
    #[must_use]
    pub fn spawn(watcher: StatusWatcher, enabled: bool) -> Self {
        if !enabled {
            return Self { handle: None };
        }

        let handle = thread::Builder::new()
            .name("hands-off-status".into())
            .spawn(move || present(&watcher));
        match handle {
            Ok(handle) => Self {
                handle: Some(handle),
            },
            Err(e) => {
                warn!("Status line unavailable: {e}");
                Self { handle: None }
            }
        }
    }

    /// Waits for the session's final state to be drawn.
    pub fn finish(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Status line thread panicked");
            }
        }
    }
}

fn present(watcher: &StatusWatcher) {
    let bar = ProgressBar::new_spinner();
    let mut shown = watcher.latest();
    render(&bar, shown.state, shown.frame);

    loop {
        match watcher.wait_newer(shown.version, TICK) {
            Some(update) => {
                if update.state != shown.state || update.frame != shown.frame {
                    render(&bar, update.state, update.frame);
                }
                shown = update;
            }
            None if watcher.is_closed() => break,
            None => bar.tick(),
        }
    }

    bar.finish_with_message(watcher.latest().state.status().headline);
}

fn render(bar: &ProgressBar, state: AlertState, frame: Option<u64>) {
    let view = state.status();
    if let Ok(style) = ProgressStyle::with_template(&template(view)) {
        bar.set_style(style);
    }
    match frame {
        Some(frame) => bar.set_message(format!("{} (frame {frame})", view.headline)),
        None => bar.set_message(view.headline),
    }
}

/// indicatif template coloring spinner and message per the status view.
fn template(view: StatusView) -> String {
    let color = match view.color {
        StatusColor::Green => "green",
        StatusColor::Red => "red",
    };
    let weight = match view.emphasis {
        Emphasis::Thin => "",
        Emphasis::Bold => ".bold",
    };
    format!("{{spinner:.{color}}} {{msg:.{color}{weight}}}")
}
