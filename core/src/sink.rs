//! Write-only logging side-channel for fire-and-forget calls.
//!
//! The callback API has no error return, so failures end as one line on a
//! `LogSink`. The default forwards to the `log` facade; `MemorySink` keeps
//! lines around for inspection.

use std::sync::Mutex;

pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards every line to `log::warn!` under the `cors_core` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn log(&self, message: &str) {
        log::warn!(target: "cors_core", "{message}");
    }
}

/// Captures lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line logged so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(message.to_string());
    }
}
