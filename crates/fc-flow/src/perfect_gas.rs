//! Calorically perfect gas: constant cp, closed-form isentropic relations.

use crate::composition::Composition;
use crate::error::{FlowError, FlowResult};
use crate::evaluator::FlowEvaluator;
use crate::station::{FlowInput, FlowStation, StaticJacobian, StaticSolution};

/// Isentropic flow with cp frozen at a reference temperature.
///
/// `Ts = Tt / f`, `Ps = Pt f^(-gamma/(gamma-1))` with `f = 1 + (gamma-1)/2 M^2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGasFlow {
    /// Temperature at which cp and gamma are frozen [K]
    pub reference_temperature_k: f64,
}

impl Default for PerfectGasFlow {
    fn default() -> Self {
        Self {
            reference_temperature_k: 298.15,
        }
    }
}

impl PerfectGasFlow {
    fn constants(&self, comp: &Composition) -> FlowResult<(f64, f64, f64)> {
        let props = comp.gas_properties();
        let cp = props.cp(self.reference_temperature_k);
        let gamma = props.checked_gamma(self.reference_temperature_k)?;
        Ok((props.gas_constant, cp, gamma))
    }
}

impl FlowEvaluator for PerfectGasFlow {
    fn name(&self) -> &str {
        "perfect-gas"
    }

    fn supports_composition(&self, comp: &Composition) -> bool {
        comp.gas_properties().is_physical()
    }

    fn evaluate(&self, input: &FlowInput<'_>) -> FlowResult<FlowStation> {
        input.validate()?;
        let (r, cp, gamma) = self.constants(input.composition)?;
        let tt = input.total_temperature.value;
        let pt = input.total_pressure.value;

        let f = 1.0 + 0.5 * (gamma - 1.0) * input.mach * input.mach;
        let ts = tt / f;
        let ps = pt * f.powf(-gamma / (gamma - 1.0));
        if !ps.is_finite() || ps <= 0.0 {
            return Err(FlowError::NonPhysical {
                what: "static pressure",
            });
        }

        Ok(FlowStation::assemble(
            input,
            r,
            StaticSolution {
                ts,
                ps,
                gamma,
                total_enthalpy: cp * tt,
                static_enthalpy: cp * ts,
            },
        ))
    }

    fn jacobian(&self, input: &FlowInput<'_>) -> FlowResult<Option<StaticJacobian>> {
        input.validate()?;
        let (_, _, gamma) = self.constants(input.composition)?;
        let f = 1.0 + 0.5 * (gamma - 1.0) * input.mach * input.mach;
        Ok(Some(StaticJacobian {
            ts_tt: 1.0 / f,
            ts_pt: 0.0,
            ps_tt: 0.0,
            ps_pt: f.powf(-gamma / (gamma - 1.0)),
        }))
    }
}
