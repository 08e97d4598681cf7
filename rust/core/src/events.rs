// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Progress and diagnostic events emitted while a run is in flight.
//!
//! Events form an ordered stream consumed by the caller. Emitting never
//! blocks the pipeline; every event is mirrored to `tracing`.

use std::cell::Cell;
use std::sync::mpsc::Sender;
use std::sync::Mutex;

/// Event severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Notification,
    Warning,
    Error,
}

/// A single progress/diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub severity: Severity,
    pub message: String,
}

impl Event {
    pub fn notification(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Notification,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Overall outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RunStatus {
    Ok,
    Warnings,
    Errors,
}

impl RunStatus {
    /// Status implied by the most severe event observed
    pub fn from_worst(worst: Option<Severity>) -> Self {
        match worst {
            None | Some(Severity::Notification) => RunStatus::Ok,
            Some(Severity::Warning) => RunStatus::Warnings,
            Some(Severity::Error) => RunStatus::Errors,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Ok => "OK",
            RunStatus::Warnings => "Warnings",
            RunStatus::Errors => "Errors",
        }
    }
}

/// Receiver side of the event stream
pub trait EventSink {
    fn emit(&self, event: Event);
}

impl EventSink for Sender<Event> {
    fn emit(&self, event: Event) {
        // A dropped receiver only means nobody is listening any more
        let _ = self.send(event);
    }
}

/// In-memory, ordered event log
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.severity == Severity::Warning)
            .collect()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Forwards events to a sink, mirrors them to `tracing` and tracks the
/// worst severity seen during one run.
pub struct Reporter<'a> {
    sink: &'a dyn EventSink,
    worst: Cell<Option<Severity>>,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a dyn EventSink) -> Self {
        Self {
            sink,
            worst: Cell::new(None),
        }
    }

    pub fn notify(&self, message: impl Into<String>) {
        self.report(Event::notification(message));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.report(Event::warning(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.report(Event::error(message));
    }

    pub fn report(&self, event: Event) {
        match event.severity {
            Severity::Notification => tracing::info!("{}", event.message),
            Severity::Warning => tracing::warn!("{}", event.message),
            Severity::Error => tracing::error!("{}", event.message),
        }
        self.worst.set(self.worst.get().max(Some(event.severity)));
        self.sink.emit(event);
    }

    pub fn status(&self) -> RunStatus {
        RunStatus::from_worst(self.worst.get())
    }
}
