//! Flight-condition balance solver.
//!
//! Given an altitude, temperature delta, Mach number, mass flow and
//! composition, this crate finds the total temperature and pressure whose flow
//! station reproduces the ambient static temperature and pressure. The two
//! residuals are driven to zero by a bounded Newton iteration on a fixed 2x2
//! system with a direct linear solve per step.

pub mod balance;
pub mod config;
pub mod error;
pub mod jacobian;
pub mod newton;
pub mod solve;
pub mod sweep;

pub use balance::BalanceProblem;
pub use config::SolverConfig;
pub use error::{Iterate, SolveReport, SolverError, SolverResult};
pub use newton::{NewtonResult, NewtonSettings};
pub use solve::{EquilibriumSolver, FlightConditions, OperatingPoint};
