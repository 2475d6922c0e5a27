//! Busy indicator for message sends

use indicatif::{ProgressBar, ProgressStyle};
use mcp_chat_application::SessionObserver;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Shows a spinner while the session is busy sending a message
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for ProgressReporter {
    fn on_busy_changed(&self, busy: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if busy {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_message("Waiting for the model...");
            pb.enable_steady_tick(Duration::from_millis(100));
            if let Some(previous) = spinner.replace(pb) {
                previous.finish_and_clear();
            }
        } else if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
    }
}
