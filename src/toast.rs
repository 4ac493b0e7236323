use std::time::{Duration, Instant};

use crate::models::{Severity, Toast};

pub const DEFAULT_DISMISS_SECS: u64 = 5;

/// Transient status messages. The latest message replaces the previous one;
/// whatever is showing auto-dismisses after the configured delay or when the
/// user dismisses it by hand.
#[derive(Debug)]
pub struct Notifier {
    current: Option<Toast>,
    dismiss_after: Duration,
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            current: None,
            dismiss_after,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.current = Some(Toast {
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drops the toast once its time is up. Called once per UI loop tick.
    pub fn tick(&mut self) {
        if let Some(toast) = &self.current {
            if toast.shown_at.elapsed() >= self.dismiss_after {
                self.current = None;
            }
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}
