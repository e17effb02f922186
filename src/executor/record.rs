//! Query result records

use std::fmt;
use std::ops::Deref;

use crate::model::{ApproachId, ApproachRow, CloseApproach, NearEarthObject, NeoRow};

/// A close approach as seen by predicates and query consumers:
/// the approach, its arena id, and the NEO it is linked to (if any).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachRecord<'db> {
    id: ApproachId,
    approach: &'db CloseApproach,
    neo: Option<&'db NearEarthObject>,
}

impl<'db> ApproachRecord<'db> {
    pub(crate) fn new(
        id: ApproachId,
        approach: &'db CloseApproach,
        neo: Option<&'db NearEarthObject>,
    ) -> Self {
        Self { id, approach, neo }
    }

    /// Arena id of the approach
    pub fn id(&self) -> ApproachId {
        self.id
    }

    /// The underlying approach
    pub fn approach(&self) -> &'db CloseApproach {
        self.approach
    }

    /// The linked NEO, `None` if the designation matched nothing
    pub fn neo(&self) -> Option<&'db NearEarthObject> {
        self.neo
    }

    /// Flattened approach and NEO attributes
    pub fn serialize(&self) -> (ApproachRow, Option<NeoRow>) {
        (self.approach.serialize(), self.neo.map(NearEarthObject::serialize))
    }
}

impl Deref for ApproachRecord<'_> {
    type Target = CloseApproach;

    fn deref(&self) -> &CloseApproach {
        self.approach
    }
}

impl fmt::Display for ApproachRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = match self.neo {
            Some(neo) => neo.fullname(),
            None => self.approach.designation().to_string(),
        };
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str(),
            who,
            self.approach.distance,
            self.approach.velocity
        )
    }
}
