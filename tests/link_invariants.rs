//! Linking Invariant Tests
//!
//! Tests for linking invariants:
//! - Every matching approach is attached exactly once, in input order
//! - Unmatched approaches stay unlinked without an error
//! - Already-linked input is refused
//! - Duplicate keys follow the configured policy

use chrono::{NaiveDate, NaiveDateTime};
use neodb::index::{DuplicatePolicy, IndexErrorCode, LinkOptions, NeoDatabase};
use neodb::model::{CloseApproach, NearEarthObject};

// =============================================================================
// Helper Functions
// =============================================================================

fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn neo(designation: &str, name: Option<&str>) -> NearEarthObject {
    NearEarthObject::new(designation, name, None, false)
}

fn approach(designation: &str, day: u32) -> CloseApproach {
    CloseApproach::new(designation, at(day), 0.1, 10.0)
}

// =============================================================================
// Attachment Tests
// =============================================================================

/// Each approach lands on its NEO exactly once and keeps input order.
#[test]
fn test_approaches_attached_once_in_order() {
    let neos = vec![neo("433", Some("Eros")), neo("1036", Some("Ganymed"))];
    let approaches = vec![
        approach("1036", 1),
        approach("433", 2),
        approach("1036", 3),
        approach("433", 4),
        approach("1036", 5),
    ];

    let db = NeoDatabase::new(neos, approaches).unwrap();

    let ganymed = db.get_by_designation("1036").unwrap();
    let days: Vec<u32> = db
        .approaches_for(ganymed)
        .map(|a| a.time.format("%d").to_string().parse().unwrap())
        .collect();
    assert_eq!(days, vec![1, 3, 5]);

    for neo in db.neos() {
        let mut ids = neo.approaches().to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), neo.approaches().len());
    }
}

/// Every linked approach points back to a NEO listing it.
#[test]
fn test_links_are_bidirectional() {
    let neos = vec![neo("433", Some("Eros")), neo("2000 FJ10", None)];
    let approaches = vec![
        approach("433", 1),
        approach("2000 FJ10", 2),
        approach("433", 3),
    ];

    let db = NeoDatabase::new(neos, approaches).unwrap();

    for record in db.query(&Default::default()) {
        let owner = record.neo().unwrap();
        assert_eq!(owner.designation, record.designation());
        assert!(owner.approaches().contains(&record.id()));
    }
}

/// Foreign keys are compared exactly during linking.
#[test]
fn test_link_is_case_sensitive() {
    let neos = vec![neo("2000 FJ10", None)];
    let approaches = vec![approach("2000 fj10", 1)];

    let db = NeoDatabase::new(neos, approaches).unwrap();

    assert_eq!(db.link_report().linked, 0);
    assert_eq!(db.link_report().unmatched, 1);
    assert!(db.approaches()[0].neo().is_none());
}

// =============================================================================
// Unmatched Approach Tests
// =============================================================================

/// Dangling foreign keys degrade gracefully.
#[test]
fn test_unmatched_approaches_tolerated() {
    let neos = vec![neo("433", Some("Eros"))];
    let approaches = vec![approach("999", 1), approach("433", 2), approach("998", 3)];

    let db = NeoDatabase::new(neos, approaches).unwrap();

    let report = db.link_report();
    assert_eq!(report.linked, 1);
    assert_eq!(report.unmatched, 2);
    assert_eq!(db.metrics_snapshot().approaches_unmatched, 2);
    assert_eq!(db.approaches().len(), 3);
}

/// No NEOs at all still builds a database.
#[test]
fn test_empty_neo_collection() {
    let db = NeoDatabase::new(Vec::new(), vec![approach("433", 1)]).unwrap();
    assert_eq!(db.link_report().unmatched, 1);
    assert!(db.get_by_designation("433").is_none());
}

// =============================================================================
// Precondition Tests
// =============================================================================

/// Feeding linked collections back in is refused.
#[test]
fn test_relink_rejected() {
    let db = NeoDatabase::new(vec![neo("433", Some("Eros"))], vec![approach("433", 1)]).unwrap();
    let (neos, approaches) = db.into_parts();

    let err = NeoDatabase::new(neos, approaches).unwrap_err();
    assert_eq!(err.code(), IndexErrorCode::NeoAlreadyLinked);
}

/// Only one side being linked is enough to refuse.
#[test]
fn test_relink_rejected_with_fresh_neos() {
    let db = NeoDatabase::new(vec![neo("433", Some("Eros"))], vec![approach("433", 1)]).unwrap();
    let (_, approaches) = db.into_parts();

    let err = NeoDatabase::new(vec![neo("433", Some("Eros"))], approaches).unwrap_err();
    assert_eq!(err.code().code(), "NEO_ALREADY_LINKED");
}

// =============================================================================
// Duplicate Policy Tests
// =============================================================================

/// Last-wins keeps the later NEO for lookups and linking.
#[test]
fn test_duplicate_designation_last_wins() {
    let neos = vec![neo("433", Some("Eros")), neo("433", Some("Eros II"))];
    let approaches = vec![approach("433", 1)];

    let db = NeoDatabase::with_options(
        neos,
        approaches,
        LinkOptions {
            duplicate_policy: DuplicatePolicy::LastWins,
        },
    )
    .unwrap();

    let found = db.get_by_designation("433").unwrap();
    assert_eq!(found.name.as_deref(), Some("Eros II"));
    assert_eq!(found.approaches().len(), 1);
    assert!(db.neos()[0].approaches().is_empty());
    assert!(db.metrics_snapshot().key_collisions >= 1);
}

/// Reject refuses case-insensitive collisions.
#[test]
fn test_case_collision_rejected() {
    let neos = vec![neo("2000 AB", None), neo("2000 ab", None)];

    let err = NeoDatabase::with_options(neos, Vec::new(), LinkOptions::strict()).unwrap_err();
    assert_eq!(err.code(), IndexErrorCode::NeoDuplicateKey);
    assert_eq!(err.key(), Some("2000 ab"));
}

/// Reject refuses two NEOs with the same name.
#[test]
fn test_name_collision_rejected() {
    let neos = vec![neo("1", Some("Twin")), neo("2", Some("twin"))];

    let err = NeoDatabase::with_options(neos, Vec::new(), LinkOptions::strict()).unwrap_err();
    assert_eq!(err.code(), IndexErrorCode::NeoDuplicateKey);
}

/// Unnamed NEOs never collide on name.
#[test]
fn test_unnamed_neos_do_not_collide() {
    let neos = vec![neo("1", None), neo("2", Some("")), neo("3", Some("  "))];

    let db = NeoDatabase::with_options(neos, Vec::new(), LinkOptions::strict()).unwrap();
    assert_eq!(db.neos().len(), 3);
}
