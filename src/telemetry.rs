//! Application telemetry events and sinks.
//!
//! gendoc is a local tool, but it still emits lightweight structured events
//! to support debugging and to capture operational signals such as the
//! active database schema version and the outcome of each generation run.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by gendoc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the current database schema version after migrations apply.
    SchemaVersionRecorded {
        /// Diesel migration version string (e.g. `20261001000000`).
        schema_version: String,
    },

    /// Summarises one documentation generation run over a class.
    DocCommentsGenerated {
        /// Simple name of the documented class.
        class_name: String,
        /// Comments inserted before methods that had none.
        inserted: usize,
        /// Existing comments replaced.
        replaced: usize,
        /// Methods left alone because they were already documented.
        skipped: usize,
        /// Methods whose comment could not be produced or applied.
        failed: usize,
    },

    /// Records that a category template was saved.
    TemplateSaved {
        /// Display name of the category (`Getter` or `Setter`).
        category: String,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Writes each event to stderr as one JSON line.
///
/// Events never leave the machine; stderr keeps them apart from command
/// output on stdout.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(error) => {
                tracing::debug!("dropping unserialisable telemetry event: {error}");
                return;
            }
        };
        if let Err(error) = writeln!(io::stderr().lock(), "{line}") {
            tracing::debug!("failed to write telemetry event: {error}");
        }
    }
}

/// Sinks for asserting on emitted telemetry in tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::{Arc, Mutex, PoisonError};

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every recorded event in memory.
    ///
    /// Clones share the same event buffer.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingTelemetrySink {
        events: Arc<Mutex<Vec<TelemetryEvent>>>,
    }

    impl RecordingTelemetrySink {
        /// Returns a copy of the events recorded so far.
        #[must_use]
        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Removes and returns the events recorded so far.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain(..)
                .collect()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }
}
