//! Lazy query execution
//!
//! Execution flow, per pulled element:
//! 1. Advance to the next approach in storage order
//! 2. Resolve its linked NEO (O(1), arena id)
//! 3. Test the filter set (AND, short-circuit, vacuously true)
//! 4. Yield on match, otherwise continue with step 1
//!
//! # Invariants
//!
//! - Each approach is examined once and yielded at most once per stream
//! - Nothing is buffered; stopping early leaves no state behind
//! - Read-only: neither approaches nor NEOs are touched

use std::iter::{FusedIterator, Take};
use std::slice;

use crate::index::NeoDatabase;
use crate::model::{ApproachId, CloseApproach};
use crate::observability::{log_event_with_fields, Event};

use super::predicate::FilterSet;
use super::record::ApproachRecord;

/// A single-pass stream of approaches matching a filter set
#[derive(Debug)]
pub struct Query<'a> {
    db: &'a NeoDatabase,
    filters: &'a FilterSet,
    cursor: std::iter::Enumerate<slice::Iter<'a, CloseApproach>>,
}

impl<'a> Query<'a> {
    fn new(db: &'a NeoDatabase, filters: &'a FilterSet) -> Self {
        Self {
            db,
            filters,
            cursor: db.approaches().iter().enumerate(),
        }
    }
}

impl<'a> Iterator for Query<'a> {
    type Item = ApproachRecord<'a>;

    fn next(&mut self) -> Option<ApproachRecord<'a>> {
        let db = self.db;
        for (index, approach) in self.cursor.by_ref() {
            let record = ApproachRecord::new(ApproachId::new(index), approach, db.neo_for(approach));
            if self.filters.matches(&record) {
                db.metrics().increment_yielded();
                return Some(record);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cursor.size_hint().1)
    }
}

impl FusedIterator for Query<'_> {}

impl NeoDatabase {
    /// Streams the close approaches matching every filter in `filters`.
    ///
    /// Approaches come out in storage order. With an empty filter set every
    /// approach is produced exactly once. The stream is lazy and
    /// single-pass; call `query` again to start over.
    pub fn query<'a>(&'a self, filters: &'a FilterSet) -> Query<'a> {
        self.metrics().increment_queries();
        log_event_with_fields(
            Event::QueryStarted,
            &[("filters", filters.len().to_string().as_str())],
        );
        Query::new(self, filters)
    }

    /// The record view of one approach
    pub fn record(&self, id: ApproachId) -> Option<ApproachRecord<'_>> {
        self.approach(id)
            .map(|approach| ApproachRecord::new(id, approach, self.neo_for(approach)))
    }
}

/// Caps a stream at `n` items; `None` or `Some(0)` leaves it unbounded.
///
/// The cap is applied lazily, so upstream filtering stops as soon as
/// `n` items have been pulled.
pub fn limit<I: Iterator>(iter: I, n: Option<usize>) -> Take<I> {
    match n {
        None | Some(0) => iter.take(usize::MAX),
        Some(n) => iter.take(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NearEarthObject;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::rc::Rc;

    fn approach(designation: &str, day: u32, distance: f64) -> CloseApproach {
        let time = NaiveDate::from_ymd_opt(2020, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        CloseApproach::new(designation, time, distance, 10.0)
    }

    fn sample() -> NeoDatabase {
        let neos = vec![
            NearEarthObject::new("433", Some("Eros"), Some(16.84), false),
            NearEarthObject::new("2000 FJ10", None, None, false),
        ];
        let approaches = vec![
            approach("433", 1, 0.3),
            approach("433", 2, 0.1),
            approach("999", 3, 0.2),
        ];
        NeoDatabase::new(neos, approaches).unwrap()
    }

    #[test]
    fn test_empty_filters_yield_each_once_in_order() {
        let db = sample();
        let filters = FilterSet::new();

        let ids: Vec<usize> = db.query(&filters).map(|r| r.id().index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_filters_and_together() {
        let db = sample();
        let filters = FilterSet::new()
            .with_fn(|r| r.distance < 0.25)
            .with_fn(|r| r.neo().is_some());

        let ids: Vec<usize> = db.query(&filters).map(|r| r.id().index()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_no_match_yields_nothing() {
        let db = sample();
        let filters = FilterSet::new().with_fn(|r| r.distance > 1.0);
        assert_eq!(db.query(&filters).count(), 0);
    }

    #[test]
    fn test_stream_is_exhaustible() {
        let db = sample();
        let filters = FilterSet::new();

        let mut stream = db.query(&filters);
        assert_eq!(stream.by_ref().count(), 3);
        assert!(stream.next().is_none());

        assert_eq!(db.query(&filters).count(), 3);
    }

    #[test]
    fn test_stream_is_lazy() {
        let db = sample();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let filters = FilterSet::new().with_fn(move |_| {
            counter.set(counter.get() + 1);
            true
        });

        let first = db.query(&filters).next();
        assert!(first.is_some());
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_record_resolves_neo() {
        let db = sample();
        let record = db.record(ApproachId::new(0)).unwrap();
        assert_eq!(record.neo().unwrap().designation, "433");
        assert!(db.record(ApproachId::new(2)).unwrap().neo().is_none());
        assert!(db.record(ApproachId::new(9)).is_none());
    }

    #[test]
    fn test_limit() {
        let db = sample();
        let filters = FilterSet::new();

        assert_eq!(limit(db.query(&filters), Some(2)).count(), 2);
        assert_eq!(limit(db.query(&filters), Some(0)).count(), 3);
        assert_eq!(limit(db.query(&filters), None).count(), 3);
        assert_eq!(limit(db.query(&filters), Some(10)).count(), 3);
    }

    #[test]
    fn test_query_metrics() {
        let db = sample();
        let filters = FilterSet::new();
        let _ = limit(db.query(&filters), Some(1)).count();

        let snap = db.metrics_snapshot();
        assert_eq!(snap.queries_started, 1);
        assert_eq!(snap.records_yielded, 1);
    }
}
