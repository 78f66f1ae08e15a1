//! Flow evaluator trait.

use crate::composition::Composition;
use crate::error::FlowResult;
use crate::station::{FlowInput, FlowStation, StaticJacobian};

/// Maps total conditions at a Mach number and mass flow to a flow station.
///
/// Implementations must be thread-safe (Send + Sync) so independent solves can
/// share one evaluator, and deterministic so a balance solve is reproducible.
pub trait FlowEvaluator: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Check if this model can evaluate the given composition.
    fn supports_composition(&self, _comp: &Composition) -> bool {
        true
    }

    /// Evaluate the station at `input`.
    fn evaluate(&self, input: &FlowInput<'_>) -> FlowResult<FlowStation>;

    /// Analytic partials of static T/P with respect to total T/P at `input`.
    ///
    /// `Ok(None)` means the model offers no derivatives; callers then linearize
    /// by differencing `evaluate`.
    fn jacobian(&self, _input: &FlowInput<'_>) -> FlowResult<Option<StaticJacobian>> {
        Ok(None)
    }
}
