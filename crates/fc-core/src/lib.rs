//! fc-core: stable foundation for the flight-conditions workspace.
//!
//! Contains:
//! - units (uom SI types + SI and imperial constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FcError, FcResult};
pub use numeric::*;
pub use units::*;
