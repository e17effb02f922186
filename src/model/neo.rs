//! Near-Earth object record

use std::fmt;

use serde::Serialize;

use super::ids::ApproachId;

/// A near-Earth object (NEO)
///
/// Carries the primary designation (required, unique), the IAU name
/// (optional), the diameter in kilometers (optional, often unknown) and
/// the potentially-hazardous flag.
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    /// Primary designation, canonical case
    pub designation: String,
    /// IAU name, never `Some("")`
    pub name: Option<String>,
    /// Diameter in kilometers
    pub diameter: Option<f64>,
    /// Potentially hazardous to Earth
    pub hazardous: bool,
    /// Linked approaches in collection order
    approaches: Vec<ApproachId>,
}

/// Flattened NEO attributes used by the writers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoRow {
    pub designation: String,
    pub name: String,
    pub diameter_km: Option<f64>,
    pub potentially_hazardous: bool,
}

impl NearEarthObject {
    /// Creates an unlinked NEO.
    ///
    /// An empty or whitespace-only name is stored as `None`.
    pub fn new(
        designation: impl Into<String>,
        name: Option<&str>,
        diameter: Option<f64>,
        hazardous: bool,
    ) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Self {
            designation: designation.into(),
            name,
            diameter: diameter.filter(|d| !d.is_nan()),
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Ids of the linked close approaches
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }

    pub(crate) fn push_approach(&mut self, id: ApproachId) {
        self.approaches.push(id);
    }

    /// True once the linker attached at least one approach
    pub fn is_linked(&self) -> bool {
        !self.approaches.is_empty()
    }

    /// `"{designation} ({name})"`, or the bare designation when unnamed
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// Flattens the NEO attributes for output
    pub fn serialize(&self) -> NeoRow {
        NeoRow {
            designation: self.designation.clone(),
            name: self.name.clone().unwrap_or_default(),
            diameter_km: self.diameter,
            potentially_hazardous: self.hazardous,
        }
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has ", self.fullname())?;
        match self.diameter {
            Some(d) => write!(f, "a diameter of {:.3} km", d)?,
            None => write!(f, "an unknown diameter")?,
        }
        let verb = if self.hazardous { "is" } else { "is not" };
        write!(f, " and {} potentially hazardous.", verb)
    }
}
