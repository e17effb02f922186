//! Begin/complete logging around one unit of work
//!
//! A scope logs `{name}_BEGIN` when opened and exactly one closing line:
//! `{name}_COMPLETE` with `elapsed_ms`, `{name}_FAILED` with a reason, or
//! `{name}_INCOMPLETE` if it is dropped while still open (early return,
//! panic).

use std::time::Instant;

use super::logger::{Logger, Severity};

/// A scope that logs the start and end of one unit of work
///
/// ```ignore
/// let scope = ObservationScope::new("LINK");
/// // ... link ...
/// scope.complete_with_fields(&[("linked", "42")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    fields: Vec<(&'a str, String)>,
    timer: Timer,
    open: bool,
}

impl<'a> ObservationScope<'a> {
    /// Opens a scope
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Opens a scope whose fields are repeated on every line
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        let scope = Self {
            name,
            fields: fields.iter().map(|&(k, v)| (k, v.to_owned())).collect(),
            timer: Timer::new(),
            open: true,
        };
        scope.emit(Severity::Info, "BEGIN", &[]);
        scope
    }

    /// Closes the scope successfully
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Closes the scope successfully, adding `extra` to the closing line
    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        let elapsed = self.timer.elapsed_ms();
        let mut closing = extra.to_vec();
        closing.push(("elapsed_ms", elapsed.as_str()));
        self.close(Severity::Info, "COMPLETE", &closing);
    }

    /// Closes the scope as failed
    pub fn fail(mut self, reason: &str) {
        self.close(Severity::Error, "FAILED", &[("reason", reason)]);
    }

    /// True once a closing line has been logged
    pub fn is_completed(&self) -> bool {
        !self.open
    }

    fn close(&mut self, severity: Severity, suffix: &str, extra: &[(&str, &str)]) {
        self.open = false;
        self.emit(severity, suffix, extra);
    }

    fn emit(&self, severity: Severity, suffix: &str, extra: &[(&str, &str)]) {
        if !Logger::enabled(severity) {
            return;
        }
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        fields.extend_from_slice(extra);
        Logger::log(severity, &format!("{}_{}", self.name, suffix), &fields);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if self.open {
            self.close(Severity::Warn, "INCOMPLETE", &[]);
        }
    }
}

/// Wall-clock timer for `elapsed_ms` fields
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Whole milliseconds since creation, as a log field value
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
