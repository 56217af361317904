// crates/user-search-core/src/runtime/events.rs
// ============================================================================
// Module: User Search Event Sinks
// Description: JSON-line, in-memory, and fan-out form event sinks.
// Purpose: Route engine events to stderr, a file, memory, several, or nowhere.
// Dependencies: serde_json, crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Sinks serialize each [`FormEvent`] as one JSON object per line. Write
//! failures are swallowed: logging must never change form behavior.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::FormEvent;
use crate::interfaces::FormEventSink;

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink that logs JSON lines to stderr.
#[derive(Debug, Default)]
pub struct StderrEventSink;

impl FormEventSink for StderrEventSink {
    fn record(&self, event: &FormEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
#[derive(Debug)]
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileEventSink {
    /// Opens the event log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl FormEventSink for FileEventSink {
    fn record(&self, event: &FormEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
        }
    }
}

/// Sink that drops every event.
#[derive(Debug, Default)]
pub struct NoopEventSink;

impl FormEventSink for NoopEventSink {
    fn record(&self, _event: &FormEvent) {}
}

/// Sink that keeps events in memory, for traces and tests.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<FormEvent>>,
}

impl MemoryEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<FormEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl FormEventSink for MemoryEventSink {
    fn record(&self, event: &FormEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Sink that forwards every event to each wrapped sink, in order.
pub struct TeeEventSink {
    /// Destinations.
    sinks: Vec<Arc<dyn FormEventSink>>,
}

impl TeeEventSink {
    /// Wraps `sinks`.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn FormEventSink>>) -> Self {
        Self {
            sinks,
        }
    }
}

impl FormEventSink for TeeEventSink {
    fn record(&self, event: &FormEvent) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}

impl fmt::Debug for TeeEventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeeEventSink").field("sinks", &self.sinks.len()).finish()
    }
}
