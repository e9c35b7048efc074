//! Spinner shown while a turn is in flight
//!
//! The conversation controller's loading flag is the caller-facing signal;
//! this is its terminal rendering.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner displayed while waiting for the assistant's reply.
pub struct TurnSpinner {
    bar: Option<ProgressBar>,
}

impl TurnSpinner {
    /// Start a spinner, or a no-op handle when `quiet` is set.
    pub fn start(quiet: bool) -> Self {
        if quiet {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("thinking…");
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar: Some(bar) }
    }

    /// Stop and clear the spinner.
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
