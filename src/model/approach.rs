//! Close approach record

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::ids::NeoId;

/// Output format for approach timestamps (UTC, minute precision)
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A close approach to Earth by a NEO
///
/// Holds the time of closest approach (UTC), the nominal distance in
/// astronomical units and the relative velocity in km/s. The NEO is
/// referenced by designation until the database links it.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    /// Foreign key: primary designation of the NEO
    designation: String,
    /// Time of closest approach (UTC)
    pub time: NaiveDateTime,
    /// Nominal approach distance (au)
    pub distance: f64,
    /// Relative approach velocity (km/s)
    pub velocity: f64,
    /// Linked NEO, set by the linker
    neo: Option<NeoId>,
}

/// Flattened approach attributes used by the writers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachRow {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
}

impl CloseApproach {
    /// Creates an unlinked close approach
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    /// Designation of the referenced NEO
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Linked NEO id, if the designation resolved
    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    pub(crate) fn set_neo(&mut self, id: NeoId) {
        self.neo = Some(id);
    }

    /// Approach time formatted as `YYYY-MM-DD HH:MM`
    pub fn time_str(&self) -> String {
        self.time.format(DATETIME_FORMAT).to_string()
    }

    /// Flattens the approach attributes for output
    pub fn serialize(&self) -> ApproachRow {
        ApproachRow {
            datetime_utc: self.time_str(),
            distance_au: self.distance,
            velocity_km_s: self.velocity,
        }
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.designation,
            self.distance,
            self.velocity
        )
    }
}
