//! User Notifications
//!
//! The error link reports each structured API error to a [`Notifier`].
//! The console notifier stands in for a modal alert: in blocking mode it
//! stalls until the user acknowledges the message.

use crate::response::GraphqlError;
use std::io::{BufRead, Write};
use std::sync::Mutex;

/// User-facing alert capability
pub trait Notifier: Send + Sync {
    fn notify(&self, error: &GraphqlError);
}

/// Writes alerts to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    blocking: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self { blocking: false }
    }

    /// Wait for Enter after every alert
    pub fn blocking() -> Self {
        Self { blocking: true }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, error: &GraphqlError) {
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        let _ = writeln!(out, "\u{26a0}  {}", error.message);

        if self.blocking {
            let _ = write!(out, "Press Enter to continue...");
            let _ = out.flush();
            drop(out);

            let mut line = String::new();
            let _ = std::io::stdin().lock().read_line(&mut line);
        }
    }
}

/// Discards alerts
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _error: &GraphqlError) {}
}

/// Keeps alert messages in memory, in arrival order
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, error: &GraphqlError) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(error.message.clone());
        }
    }
}
