//! neodb - A deterministic in-memory database of near-Earth objects
//!
//! Links close approaches to the NEOs they belong to, indexes NEOs by
//! designation and name, and streams approaches through composable filters.
//!
//! ```ignore
//! use neodb::executor::{create_filters, limit, FilterCriteria};
//! use neodb::extract::{load_approaches, load_neos};
//! use neodb::index::NeoDatabase;
//!
//! let db = NeoDatabase::new(load_neos("data/neos.csv")?, load_approaches("data/cad.json")?)?;
//! let criteria = FilterCriteria { hazardous: Some(true), ..Default::default() };
//! let filters = create_filters(&criteria);
//! for record in limit(db.query(&filters), Some(5)) {
//!     println!("{}", record);
//! }
//! ```

pub mod cli;
pub mod executor;
pub mod extract;
pub mod index;
pub mod model;
pub mod observability;
pub mod output;
