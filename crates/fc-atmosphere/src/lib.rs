//! fc-atmosphere: ambient static conditions from a layered standard atmosphere.
//!
//! Provides:
//! - `AtmosphereTable`: versioned layer data (bases, lapse rates, sea-level reference)
//! - `AtmosphereLookup`: closed-form evaluation of each layer with analytic
//!   altitude derivatives
//! - `TemperatureOffset`: standard-day temperature plus a user delta
//! - `Ambient`: the composition of the two, producing the static targets used by
//!   the flight-condition balance
//!
//! # Example
//!
//! ```
//! use fc_atmosphere::{Ambient, AtmosphereLookup};
//! use fc_core::units::{delta_deg_r, ft};
//!
//! let lookup = AtmosphereLookup::us_standard_1976().unwrap();
//! let ambient = Ambient::new(&lookup);
//! let state = ambient.evaluate(ft(30_000.0), delta_deg_r(0.0)).unwrap();
//! assert!(state.static_pressure.value < 101_325.0);
//! ```

pub mod ambient;
pub mod error;
pub mod lookup;
pub mod offset;
pub mod table;

pub use ambient::{Ambient, AmbientDerivatives, AmbientState};
pub use error::{AtmosphereError, AtmosphereResult};
pub use lookup::{AltitudeDerivatives, AtmosphereLookup, AtmosphereProperties, LayerBoundary};
pub use offset::{OffsetPartials, TemperatureOffset};
pub use table::{AtmosphereTable, LayerSpec, RangePolicy};
