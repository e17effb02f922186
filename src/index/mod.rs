//! Linker/Indexer subsystem for neodb
//!
//! Indexes are derived, in-memory-only state built once at construction.
//!
//! # Design Principles
//!
//! - Arena ownership: the database owns both collections; cross references
//!   are `NeoId`/`ApproachId`, never pointers
//! - Tolerant: unmatched approaches are logged, not rejected
//! - Immutable after construction
//!
//! # Invariants
//!
//! - An approach whose designation equals a NEO designation exactly
//!   references that NEO and appears once in its approaches, in input order
//! - Lookup keys are trimmed and lowercased; the empty key is never stored
//! - Key collisions keep the last NEO unless the policy is `Reject`

mod database;
mod errors;
mod linker;
mod lookup;

pub use database::NeoDatabase;
pub use errors::{IndexError, IndexErrorCode, IndexResult};
pub use linker::{DuplicatePolicy, LinkOptions, LinkReport};
pub use lookup::{normalize_key, LookupTable};
