//! Query engine for neodb
//!
//! Produces a lazy, order-preserving stream of close approaches matching
//! every predicate of a filter set.
//!
//! # Execution Flow
//!
//! 1. Walk approaches in storage order
//! 2. Build the record view (approach + linked NEO)
//! 3. Test all predicates (AND, vacuously true when none)
//! 4. Yield matches on demand
//!
//! # Invariants
//!
//! - Deterministic: same filters + same database = same results
//! - Each approach yielded at most once per stream
//! - Read-only traversal

mod filters;
mod predicate;
mod query;
mod record;

pub use filters::{
    create_filters, Attribute, AttributeFilter, AttributeValue, Comparison, FilterCriteria,
};
pub use predicate::{FilterSet, Predicate};
pub use query::{limit, Query};
pub use record::ApproachRecord;
