//! Record models for neodb
//!
//! Two record kinds are held by the database:
//! - `NearEarthObject`: identified by its primary designation
//! - `CloseApproach`: an approach event referencing a NEO by designation
//!
//! # Invariants
//!
//! - Records are created unlinked
//! - Only the linker (`crate::index`) sets `CloseApproach::neo` and
//!   `NearEarthObject::approaches`
//! - Cross references are arena ids, never owning pointers

mod approach;
mod ids;
mod neo;

pub use approach::{ApproachRow, CloseApproach, DATETIME_FORMAT};
pub use ids::{ApproachId, NeoId};
pub use neo::{NearEarthObject, NeoRow};
