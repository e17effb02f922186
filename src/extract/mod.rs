//! Extraction of source records
//!
//! - `load_neos`: NASA/JPL SBDB CSV export -> `NearEarthObject`s
//! - `load_approaches`: JPL CAD JSON export -> `CloseApproach`es
//!
//! Both return unlinked records in file order; linking is the database's job.

mod approaches;
mod csv;
mod errors;
mod neos;

pub use approaches::{load_approaches, read_approaches, CAD_DATETIME_FORMAT};
pub use errors::{ExtractError, ExtractResult};
pub use neos::{load_neos, read_neos};
