// src/application/services/events.rs
//!
//! Lifecycle event dispatch for one import run. The engine calls the sink
//! at defined points; the sink fans each call out to the built-in stat
//! recorder first, then to every attached listener in insertion order.
//! Emission is synchronous and single-threaded; each event fires exactly
//! once, in engine call order.

use std::fmt;

use tracing::{debug, info, warn};

use crate::domain::candidate::Candidate;
use crate::domain::import::{FailReason, ImportOutcome, ImportStats, SkipReason};

/// Observer of import lifecycle events.
///
/// Every method has a no-op default, so a listener overrides only the
/// event kinds it cares about (the stat recorder handles all seven, a
/// persistence listener typically only `on_bookmark_imported`). Listeners
/// are expected not to panic; failures are not isolated from each other.
pub trait ImportListener {
    fn on_imports_started(&mut self) {}
    fn on_import_started(&mut self, _candidate: &Candidate) {}
    fn on_bookmark_imported(&mut self, _candidate: &Candidate) {}
    fn on_bookmark_skipped(&mut self, _candidate: &Candidate, _reason: SkipReason) {}
    fn on_import_failed(&mut self, _candidate: &Candidate, _reason: FailReason) {}
    fn on_bookmark_not_processed(&mut self, _candidate: &Candidate) {}
    fn on_imports_ended(&mut self, _outcome: &ImportOutcome) {}
}

/// Built-in listener accumulating `ImportStats`. Present in every sink,
/// always notified first, and the single source of truth for counts no
/// matter how many other listeners are attached.
#[derive(Debug, Default)]
pub struct StatRecorder {
    stats: ImportStats,
}

impl StatRecorder {
    pub fn report(&self) -> ImportStats {
        self.stats.clone()
    }
}

impl ImportListener for StatRecorder {
    fn on_bookmark_imported(&mut self, _candidate: &Candidate) {
        self.stats.record_imported();
    }

    fn on_bookmark_skipped(&mut self, _candidate: &Candidate, reason: SkipReason) {
        self.stats.record_skipped(reason);
    }

    fn on_import_failed(&mut self, _candidate: &Candidate, reason: FailReason) {
        self.stats.record_failed(reason);
    }

    fn on_bookmark_not_processed(&mut self, _candidate: &Candidate) {
        self.stats.record_not_processed();
    }
}

/// Listener logging per-record decisions through `tracing`.
#[derive(Debug, Default)]
pub struct LoggingListener;

impl ImportListener for LoggingListener {
    fn on_imports_started(&mut self) {
        info!("import run started");
    }

    fn on_bookmark_imported(&mut self, candidate: &Candidate) {
        debug!("line {}: imported {}", candidate.source_line, candidate.url);
    }

    fn on_bookmark_skipped(&mut self, candidate: &Candidate, reason: SkipReason) {
        debug!(
            "line {}: skipped {} ({:?})",
            candidate.source_line, candidate.url, reason
        );
    }

    fn on_import_failed(&mut self, candidate: &Candidate, reason: FailReason) {
        warn!(
            "line {}: failed {} ({:?})",
            candidate.source_line, candidate.url, reason
        );
    }

    fn on_imports_ended(&mut self, outcome: &ImportOutcome) {
        info!(
            "import run ended: {:?}, {} records",
            outcome.status(),
            outcome.stats().total()
        );
    }
}

/// Per-run event dispatcher owned by the engine.
#[derive(Default)]
pub struct EventSink {
    stats: StatRecorder,
    listeners: Vec<Box<dyn ImportListener>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, listener: Box<dyn ImportListener>) {
        self.listeners.push(listener);
    }

    /// Current tally from the built-in stat recorder.
    pub fn report(&self) -> ImportStats {
        self.stats.report()
    }

    pub fn imports_started(&mut self) {
        self.stats.on_imports_started();
        for listener in &mut self.listeners {
            listener.on_imports_started();
        }
    }

    pub fn import_started(&mut self, candidate: &Candidate) {
        self.stats.on_import_started(candidate);
        for listener in &mut self.listeners {
            listener.on_import_started(candidate);
        }
    }

    pub fn bookmark_imported(&mut self, candidate: &Candidate) {
        self.stats.on_bookmark_imported(candidate);
        for listener in &mut self.listeners {
            listener.on_bookmark_imported(candidate);
        }
    }

    pub fn bookmark_skipped(&mut self, candidate: &Candidate, reason: SkipReason) {
        self.stats.on_bookmark_skipped(candidate, reason);
        for listener in &mut self.listeners {
            listener.on_bookmark_skipped(candidate, reason);
        }
    }

    pub fn import_failed(&mut self, candidate: &Candidate, reason: FailReason) {
        self.stats.on_import_failed(candidate, reason);
        for listener in &mut self.listeners {
            listener.on_import_failed(candidate, reason);
        }
    }

    pub fn bookmark_not_processed(&mut self, candidate: &Candidate) {
        self.stats.on_bookmark_not_processed(candidate);
        for listener in &mut self.listeners {
            listener.on_bookmark_not_processed(candidate);
        }
    }

    pub fn imports_ended(&mut self, outcome: &ImportOutcome) {
        self.stats.on_imports_ended(outcome);
        for listener in &mut self.listeners {
            listener.on_imports_ended(outcome);
        }
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink")
            .field("stats", &self.stats)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
