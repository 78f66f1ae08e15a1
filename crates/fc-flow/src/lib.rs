//! fc-flow: compressible flow stations for the flight-condition balance.
//!
//! Provides:
//! - Species definitions with linear cp(T) fits
//! - Composition handling (mass fractions, reactant mixing)
//! - `FlowEvaluator` trait: total conditions + Mach + mass flow -> static conditions
//! - Two evaluators: calorically perfect and thermally perfect gas
//!
//! # Architecture
//!
//! The balance solver only sees the `FlowEvaluator` trait. Evaluators may be
//! closed-form or iterate internally; either way they report failures as
//! `FlowError` and may supply an analytic Jacobian of the static outputs with
//! respect to the total inputs.
//!
//! # Example
//!
//! ```
//! use fc_flow::{Composition, FlowEvaluator, FlowInput, ThermallyPerfectFlow};
//! use fc_core::units::{k, kgps, pa};
//!
//! let model = ThermallyPerfectFlow::default();
//! let air = Composition::air();
//! let input = FlowInput::new(pa(50_000.0), k(260.0), 0.8, kgps(45.0), &air);
//! let station = model.evaluate(&input).unwrap();
//! assert!(station.static_temperature.value < 260.0);
//! ```

pub mod composition;
pub mod error;
pub mod evaluator;
pub mod gas;
pub mod perfect_gas;
pub mod species;
pub mod station;
pub mod thermally_perfect;

// Re-exports for ergonomics
pub use composition::Composition;
pub use error::{FlowError, FlowResult};
pub use evaluator::FlowEvaluator;
pub use gas::{GasProperties, SpecEnthalpy, SpecHeatCapacity};
pub use perfect_gas::PerfectGasFlow;
pub use species::Species;
pub use station::{FlowInput, FlowStation, StaticJacobian};
pub use thermally_perfect::ThermallyPerfectFlow;
