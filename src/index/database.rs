//! NEO database
//!
//! Owns the NEO and approach arenas, links them at construction and
//! serves case-insensitive exact lookups.
//!
//! # API
//!
//! - `new(neos, approaches)` - Link and index (last-wins on duplicates)
//! - `with_options(neos, approaches, options)` - Same, with a duplicate policy
//! - `get_by_designation(designation)` - Exact, case-insensitive, trimmed
//! - `get_by_name(name)` - Exact, case-insensitive, trimmed
//! - `query(filters)` - Lazy filtered stream (see `crate::executor`)

use crate::model::{ApproachId, CloseApproach, NearEarthObject, NeoId};
use crate::observability::{
    log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot, ObservationScope,
};

use super::errors::{IndexError, IndexResult};
use super::linker::{self, DuplicatePolicy, LinkOptions, LinkReport};
use super::lookup::LookupTable;

/// A database of near-Earth objects and their close approaches.
///
/// Read-only after construction; every accessor takes `&self`.
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    designation_to_neo: LookupTable,
    name_to_neo: LookupTable,
    report: LinkReport,
    metrics: MetricsRegistry,
}

impl NeoDatabase {
    /// Links and indexes the collections with default options.
    ///
    /// Both collections must be unlinked; otherwise `NEO_ALREADY_LINKED`.
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> IndexResult<Self> {
        Self::with_options(neos, approaches, LinkOptions::default())
    }

    /// Links and indexes the collections.
    ///
    /// Behavior:
    /// - Each approach whose designation equals a NEO designation exactly
    ///   references that NEO and is appended to its approaches, in input order
    /// - Approaches without a match stay unlinked (logged, not an error)
    /// - Designation and name lookup tables are built after linking
    pub fn with_options(
        mut neos: Vec<NearEarthObject>,
        mut approaches: Vec<CloseApproach>,
        options: LinkOptions,
    ) -> IndexResult<Self> {
        let neo_count = neos.len().to_string();
        let approach_count = approaches.len().to_string();
        let scope = ObservationScope::with_fields(
            "LINK",
            &[("approaches", approach_count.as_str()), ("neos", neo_count.as_str())],
        );

        let metrics = MetricsRegistry::new();
        let (report, designation_to_neo, name_to_neo) =
            match build(&mut neos, &mut approaches, options, &metrics) {
                Ok(parts) => parts,
                Err(e) => {
                    scope.fail(e.message());
                    return Err(e);
                }
            };

        metrics.set_neos_indexed(neos.len() as u64);
        scope.complete_with_fields(&[
            ("linked", report.linked.to_string().as_str()),
            ("unmatched", report.unmatched.to_string().as_str()),
        ]);

        Ok(Self {
            neos,
            approaches,
            designation_to_neo,
            name_to_neo,
            report,
            metrics,
        })
    }

    /// Finds a NEO by primary designation.
    ///
    /// Input is trimmed and compared case-insensitively; no partial matches.
    pub fn get_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.lookup(&self.designation_to_neo, "designation", designation)
    }

    /// Finds a NEO by IAU name.
    ///
    /// No NEO is stored under the empty name, so `""` always misses.
    pub fn get_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.lookup(&self.name_to_neo, "name", name)
    }

    /// `get_by_name` for possibly-absent input; `None` always misses
    pub fn get_by_optional_name(&self, name: Option<&str>) -> Option<&NearEarthObject> {
        match name {
            Some(name) => self.get_by_name(name),
            None => {
                self.metrics.record_lookup(false);
                None
            }
        }
    }

    fn lookup(&self, table: &LookupTable, kind: &str, key: &str) -> Option<&NearEarthObject> {
        let found = table.get(key).and_then(|id| self.neo(id));
        self.metrics.record_lookup(found.is_some());
        if found.is_none() {
            log_event_with_fields(Event::LookupMiss, &[("key", key), ("table", kind)]);
        }
        found
    }

    /// NEO by arena id
    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.index())
    }

    /// Close approach by arena id
    pub fn approach(&self, id: ApproachId) -> Option<&CloseApproach> {
        self.approaches.get(id.index())
    }

    /// The NEO an approach is linked to
    pub fn neo_for(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo().and_then(|id| self.neo(id))
    }

    /// A NEO's approaches in collection order
    pub fn approaches_for<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        neo.approaches().iter().filter_map(move |id| self.approach(*id))
    }

    /// All NEOs in input order
    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// All close approaches in input order
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Counts from the linking pass
    pub fn link_report(&self) -> LinkReport {
        self.report
    }

    pub(crate) fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Current counters
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Returns the linked collections to the caller
    pub fn into_parts(self) -> (Vec<NearEarthObject>, Vec<CloseApproach>) {
        (self.neos, self.approaches)
    }
}

/// Checks preconditions, links, then indexes.
fn build(
    neos: &mut [NearEarthObject],
    approaches: &mut [CloseApproach],
    options: LinkOptions,
    metrics: &MetricsRegistry,
) -> IndexResult<(LinkReport, LookupTable, LookupTable)> {
    linker::check_unlinked(neos, approaches)?;
    let report = linker::link(neos, approaches, metrics);
    let (designations, names) = build_lookup_tables(neos, options, metrics)?;
    Ok((report, designations, names))
}

/// Builds the designation and name tables over the NEO arena.
fn build_lookup_tables(
    neos: &[NearEarthObject],
    options: LinkOptions,
    metrics: &MetricsRegistry,
) -> IndexResult<(LookupTable, LookupTable)> {
    let mut designations = LookupTable::with_capacity(neos.len());
    let mut names = LookupTable::new();

    for (index, neo) in neos.iter().enumerate() {
        let id = NeoId::new(index);

        if let Some(previous) = designations.insert(&neo.designation, id) {
            on_collision(options, metrics, "designation", &neo.designation, previous, id)?;
        }

        if let Some(name) = neo.name.as_deref() {
            if let Some(previous) = names.insert(name, id) {
                on_collision(options, metrics, "name", name, previous, id)?;
            }
        }
    }

    Ok((designations, names))
}

fn on_collision(
    options: LinkOptions,
    metrics: &MetricsRegistry,
    table: &str,
    key: &str,
    previous: NeoId,
    current: NeoId,
) -> IndexResult<()> {
    match options.duplicate_policy {
        DuplicatePolicy::Reject => Err(IndexError::duplicate_key(table, key)),
        DuplicatePolicy::LastWins => {
            metrics.increment_key_collisions();
            log_event_with_fields(
                Event::LookupKeyCollision,
                &[
                    ("key", key),
                    ("kept", current.to_string().as_str()),
                    ("replaced", previous.to_string().as_str()),
                    ("table", table),
                ],
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn approach(designation: &str, day: u32) -> CloseApproach {
        let time = NaiveDate::from_ymd_opt(2021, 3, day)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        CloseApproach::new(designation, time, 0.05, 12.0)
    }

    fn sample() -> NeoDatabase {
        let neos = vec![
            NearEarthObject::new("433", Some("Eros"), Some(16.84), false),
            NearEarthObject::new("2000 FJ10", None, None, false),
        ];
        let approaches = vec![approach("433", 1), approach("433", 2), approach("999", 3)];
        NeoDatabase::new(neos, approaches).unwrap()
    }

    #[test]
    fn test_scenario_eros() {
        let db = sample();

        let eros = db.get_by_designation("433").unwrap();
        assert_eq!(eros.approaches().len(), 2);
        assert_eq!(db.get_by_name("eros"), Some(eros));
        assert_eq!(db.approaches()[2].neo(), None);
        assert_eq!(db.link_report(), LinkReport { linked: 2, unmatched: 1 });
    }

    #[test]
    fn test_bidirectional_navigation() {
        let db = sample();
        let eros = db.get_by_designation("433").unwrap();

        for ca in db.approaches_for(eros) {
            assert_eq!(db.neo_for(ca), Some(eros));
        }
        assert_eq!(db.approaches_for(eros).count(), 2);
    }

    #[test]
    fn test_designation_lookup_trims_and_ignores_case() {
        let db = sample();
        let a = db.get_by_designation("2000 FJ10").unwrap();
        let b = db.get_by_designation("2000 fj10 ").unwrap();
        let c = db.get_by_designation(" 2000 FJ10").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_empty_and_absent_name_miss() {
        let db = sample();
        assert!(db.get_by_name("").is_none());
        assert!(db.get_by_name("  ").is_none());
        assert!(db.get_by_optional_name(None).is_none());
    }

    #[test]
    fn test_lookup_metrics() {
        let db = sample();
        db.get_by_designation("433");
        db.get_by_name("nobody");

        let snap = db.metrics_snapshot();
        assert_eq!(snap.lookups, 2);
        assert_eq!(snap.lookup_misses, 1);
        assert_eq!(snap.neos_indexed, 2);
        assert_eq!(snap.approaches_unmatched, 1);
    }

    #[test]
    fn test_relinking_rejected() {
        let (neos, approaches) = sample().into_parts();
        let err = NeoDatabase::new(neos, approaches).unwrap_err();
        assert_eq!(err.code().code(), "NEO_ALREADY_LINKED");
    }

    #[test]
    fn test_name_collision_last_wins() {
        let neos = vec![
            NearEarthObject::new("1", Some("Twin"), None, false),
            NearEarthObject::new("2", Some("TWIN"), None, false),
        ];
        let db = NeoDatabase::new(neos, Vec::new()).unwrap();

        assert_eq!(db.get_by_name("twin").unwrap().designation, "2");
        assert_eq!(db.metrics_snapshot().key_collisions, 1);
    }

    #[test]
    fn test_name_collision_rejected_when_strict() {
        let neos = vec![
            NearEarthObject::new("1", Some("Twin"), None, false),
            NearEarthObject::new("2", Some("TWIN"), None, false),
        ];
        let err = NeoDatabase::with_options(neos, Vec::new(), LinkOptions::strict()).unwrap_err();

        assert_eq!(err.code().code(), "NEO_DUPLICATE_KEY");
        assert_eq!(err.key(), Some("TWIN"));
    }

    #[test]
    fn test_exact_duplicate_designation() {
        let neos = vec![
            NearEarthObject::new("433", Some("Eros"), None, false),
            NearEarthObject::new("433", None, None, true),
        ];
        let approaches = vec![approach("433", 1)];

        let db = NeoDatabase::new(neos.clone(), approaches.clone()).unwrap();
        assert!(db.get_by_designation("433").unwrap().hazardous);
        assert_eq!(db.approaches()[0].neo(), Some(NeoId::new(1)));

        let err = NeoDatabase::with_options(neos, approaches, LinkOptions::strict()).unwrap_err();
        assert_eq!(err.key(), Some("433"));
    }

    #[test]
    fn test_designation_case_collision_rejected_when_strict() {
        let neos = vec![
            NearEarthObject::new("2020 ab", None, None, false),
            NearEarthObject::new("2020 AB", None, None, false),
        ];
        let err = NeoDatabase::with_options(neos, Vec::new(), LinkOptions::strict()).unwrap_err();
        assert_eq!(err.code().code(), "NEO_DUPLICATE_KEY");
    }
}
