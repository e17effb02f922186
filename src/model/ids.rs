//! Arena identifiers
//!
//! Ids are positions in the database's NEO and approach vectors.
//! They are only meaningful for the database that issued them.

use std::fmt;

/// Identifier of a NEO inside a `NeoDatabase`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NeoId(usize);

impl NeoId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena position
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "neo#{}", self.0)
    }
}

/// Identifier of a close approach inside a `NeoDatabase`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApproachId(usize);

impl ApproachId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena position
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ApproachId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "approach#{}", self.0)
    }
}
