//! Predicate contract and filter sets
//!
//! A predicate is any test over one `ApproachRecord`. A `FilterSet`
//! combines predicates with AND semantics; the empty set matches
//! everything.

use std::fmt;

use super::record::ApproachRecord;

/// A pure boolean test over a close approach
pub trait Predicate {
    /// Returns true if the record satisfies this predicate
    fn test(&self, record: &ApproachRecord<'_>) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&ApproachRecord<'_>) -> bool,
{
    fn test(&self, record: &ApproachRecord<'_>) -> bool {
        self(record)
    }
}

/// An unordered collection of predicates applied conjunctively
#[derive(Default)]
pub struct FilterSet {
    predicates: Vec<Box<dyn Predicate>>,
}

impl FilterSet {
    /// Creates an empty filter set (matches every record)
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a boxed predicate
    pub fn push(&mut self, predicate: Box<dyn Predicate>) {
        self.predicates.push(predicate);
    }

    /// Adds a predicate, builder style
    pub fn with<P: Predicate + 'static>(mut self, predicate: P) -> Self {
        self.push(Box::new(predicate));
        self
    }

    /// Adds a closure predicate, builder style
    pub fn with_fn<F>(self, f: F) -> Self
    where
        F: Fn(&ApproachRecord<'_>) -> bool + 'static,
    {
        self.with(f)
    }

    /// Number of predicates
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// True if the set holds no predicates
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Checks if a record matches all predicates.
    ///
    /// Vacuously true for the empty set. Stops at the first failing predicate.
    pub fn matches(&self, record: &ApproachRecord<'_>) -> bool {
        self.predicates.iter().all(|p| p.test(record))
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSet")
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

impl FromIterator<Box<dyn Predicate>> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Box<dyn Predicate>>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl Extend<Box<dyn Predicate>> for FilterSet {
    fn extend<I: IntoIterator<Item = Box<dyn Predicate>>>(&mut self, iter: I) {
        self.predicates.extend(iter);
    }
}
