//! Observability events for neodb
//!
//! Every log line emitted by the crate names one of these events.

use std::fmt;

use super::logger::Severity;

/// Observable events in neodb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Extraction
    /// NEO file parsed
    NeosLoaded,
    /// Close approach file parsed
    ApproachesLoaded,

    // Linking
    /// Approaches without a matching NEO were left unlinked
    UnmatchedApproaches,
    /// Two NEOs share a lookup key; the later one wins
    LookupKeyCollision,

    // Lookup
    /// Lookup found no NEO
    LookupMiss,

    // Query
    /// Query stream created
    QueryStarted,

    // Output
    /// Results written to a file
    OutputWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::NeosLoaded => "NEOS_LOADED",
            Event::ApproachesLoaded => "APPROACHES_LOADED",
            Event::UnmatchedApproaches => "UNMATCHED_APPROACHES",
            Event::LookupKeyCollision => "LOOKUP_KEY_COLLISION",
            Event::LookupMiss => "LOOKUP_MISS",
            Event::QueryStarted => "QUERY_STARTED",
            Event::OutputWritten => "OUTPUT_WRITTEN",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::UnmatchedApproaches | Event::LookupKeyCollision => Severity::Warn,
            Event::LookupMiss | Event::QueryStarted => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
