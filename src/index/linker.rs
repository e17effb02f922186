//! Linker for neodb
//!
//! Cross-links the NEO and approach arenas by designation.
//!
//! Behavior:
//! - Verify both collections are unlinked
//! - Build one designation -> NEO map (exact, case-sensitive)
//! - Resolve every approach in input order
//! - Attach resolved approaches; unresolved ones stay unlinked
//!
//! Linking is O(N + A). A repeated designation resolves to the last NEO
//! carrying it; duplicate policy is enforced by the lookup tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{ApproachId, CloseApproach, NearEarthObject, NeoId};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

use super::errors::{IndexError, IndexResult};

/// What to do when two NEOs share a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the last-indexed NEO and log a warning
    #[default]
    LastWins,
    /// Fail construction with `NEO_DUPLICATE_KEY`
    Reject,
}

/// Options for database construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkOptions {
    pub duplicate_policy: DuplicatePolicy,
}

impl LinkOptions {
    /// Options rejecting duplicate keys
    pub fn strict() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

/// Outcome counts of one linking pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkReport {
    /// Approaches attached to a NEO
    pub linked: usize,
    /// Approaches whose designation matched no NEO
    pub unmatched: usize,
}

/// Fails if any record already carries a link.
pub(crate) fn check_unlinked(
    neos: &[NearEarthObject],
    approaches: &[CloseApproach],
) -> IndexResult<()> {
    if let Some(neo) = neos.iter().find(|n| n.is_linked()) {
        return Err(IndexError::already_linked(format!(
            "NEO '{}' already has {} approaches",
            neo.designation,
            neo.approaches().len()
        )));
    }

    if let Some(index) = approaches.iter().position(|a| a.neo().is_some()) {
        return Err(IndexError::already_linked(format!(
            "approach {} for '{}' already references a NEO",
            index,
            approaches[index].designation()
        )));
    }

    Ok(())
}

/// Links approaches to NEOs in place.
///
/// Approaches are attached to their NEO in input order. Unmatched
/// approaches are counted, logged once and left unlinked.
pub(crate) fn link(
    neos: &mut [NearEarthObject],
    approaches: &mut [CloseApproach],
    metrics: &MetricsRegistry,
) -> LinkReport {
    let targets = resolve(neos, approaches);

    let mut report = LinkReport::default();
    for (index, (approach, target)) in approaches.iter_mut().zip(targets).enumerate() {
        match target {
            Some(neo_id) => {
                approach.set_neo(neo_id);
                neos[neo_id.index()].push_approach(ApproachId::new(index));
                metrics.increment_linked();
                report.linked += 1;
            }
            None => {
                metrics.increment_unmatched();
                report.unmatched += 1;
            }
        }
    }

    if report.unmatched > 0 {
        log_event_with_fields(
            Event::UnmatchedApproaches,
            &[("count", report.unmatched.to_string().as_str())],
        );
    }

    report
}

/// Maps each approach to the NEO its designation names.
fn resolve(neos: &[NearEarthObject], approaches: &[CloseApproach]) -> Vec<Option<NeoId>> {
    let designation_to_index: HashMap<&str, NeoId> = neos
        .iter()
        .enumerate()
        .map(|(index, neo)| (neo.designation.as_str(), NeoId::new(index)))
        .collect();

    approaches
        .iter()
        .map(|a| designation_to_index.get(a.designation()).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn neo(designation: &str) -> NearEarthObject {
        NearEarthObject::new(designation, None, None, false)
    }

    fn approach(designation: &str, day: u32) -> CloseApproach {
        let time = NaiveDate::from_ymd_opt(2020, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        CloseApproach::new(designation, time, 0.1, 10.0)
    }

    #[test]
    fn test_link_preserves_order() {
        let mut neos = vec![neo("433"), neo("1036")];
        let mut approaches = vec![
            approach("433", 1),
            approach("1036", 2),
            approach("433", 3),
        ];
        let metrics = MetricsRegistry::new();

        let report = link(&mut neos, &mut approaches, &metrics);

        assert_eq!(report, LinkReport { linked: 3, unmatched: 0 });
        assert_eq!(
            neos[0].approaches(),
            &[ApproachId::new(0), ApproachId::new(2)]
        );
        assert_eq!(neos[1].approaches(), &[ApproachId::new(1)]);
        assert_eq!(approaches[1].neo(), Some(NeoId::new(1)));
    }

    #[test]
    fn test_link_is_case_sensitive() {
        let mut neos = vec![neo("2000 FJ10")];
        let mut approaches = vec![approach("2000 fj10", 1)];
        let metrics = MetricsRegistry::new();

        let report = link(&mut neos, &mut approaches, &metrics);

        assert_eq!(report.unmatched, 1);
        assert_eq!(approaches[0].neo(), None);
        assert!(neos[0].approaches().is_empty());
    }

    #[test]
    fn test_duplicate_designation_last_wins() {
        let mut neos = vec![neo("433"), neo("433")];
        let mut approaches = vec![approach("433", 1)];
        let metrics = MetricsRegistry::new();

        link(&mut neos, &mut approaches, &metrics);

        assert_eq!(approaches[0].neo(), Some(NeoId::new(1)));
        assert!(neos[0].approaches().is_empty());
        assert_eq!(neos[1].approaches(), &[ApproachId::new(0)]);
    }

    #[test]
    fn test_check_unlinked_detects_linked_approach() {
        let mut neos = vec![neo("433")];
        let mut approaches = vec![approach("433", 1)];
        let metrics = MetricsRegistry::new();
        link(&mut neos, &mut approaches, &metrics);

        let fresh = vec![neo("433")];
        let err = check_unlinked(&fresh, &approaches).unwrap_err();
        assert_eq!(err.code().code(), "NEO_ALREADY_LINKED");

        let err = check_unlinked(&neos, &[]).unwrap_err();
        assert_eq!(err.code().code(), "NEO_ALREADY_LINKED");
    }
}
