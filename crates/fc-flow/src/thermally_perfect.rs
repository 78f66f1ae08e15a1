//! Thermally perfect gas: cp varies with temperature.
//!
//! The static temperature solves the energy equation
//!
//! `h(Tt) = h(Ts) + (M a(Ts))^2 / 2 = h(Ts) + M^2 gamma(Ts) R Ts / 2`
//!
//! by a scalar Newton iteration, and the static pressure follows from the
//! isentropic condition `s(Ts, Ps) = s(Tt, Pt)`:
//!
//! `Ps = Pt exp((phi(Ts) - phi(Tt)) / R)`, with `phi(T) = integral cp/T dT`.

use crate::composition::Composition;
use crate::error::{FlowError, FlowResult};
use crate::evaluator::FlowEvaluator;
use crate::gas::GasProperties;
use crate::station::{FlowInput, FlowStation, StaticJacobian, StaticSolution};

/// Isentropic flow of a thermally perfect gas with an iterative static solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermallyPerfectFlow {
    /// Iteration cap for the static-temperature solve
    pub max_iterations: usize,
    /// Relative step size at which the static-temperature solve stops
    pub tolerance: f64,
}

impl Default for ThermallyPerfectFlow {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-14,
        }
    }
}

/// Converged static temperature and the slope of the energy residual there.
#[derive(Debug, Clone, Copy)]
struct StaticTemperature {
    ts: f64,
    /// d/dTs of `h(Ts) + M^2 gamma(Ts) R Ts / 2`
    slope: f64,
}

impl ThermallyPerfectFlow {
    fn static_temperature(
        &self,
        gas: &GasProperties,
        tt: f64,
        mach: f64,
    ) -> FlowResult<StaticTemperature> {
        let r = gas.gas_constant;
        let half_m2 = 0.5 * mach * mach;
        let target = gas.enthalpy(tt);

        let energy = |t: f64| gas.enthalpy(t) + half_m2 * gas.gamma(t) * r * t;
        let slope = |t: f64| gas.cp(t) + half_m2 * r * (gas.gamma(t) + t * gas.gamma_slope(t));

        // Perfect-gas estimate at the total temperature.
        let mut ts = tt / (1.0 + half_m2 * (gas.checked_gamma(tt)? - 1.0));
        for _ in 0..self.max_iterations {
            gas.checked_gamma(ts)?;
            let step = (energy(ts) - target) / slope(ts);
            if !step.is_finite() {
                return Err(FlowError::NonPhysical {
                    what: "static temperature iteration",
                });
            }
            let mut next = ts - step;
            if next <= 0.0 {
                next = 0.5 * ts;
            }
            let converged = (next - ts).abs() <= self.tolerance * ts;
            ts = next;
            if converged {
                return Ok(StaticTemperature {
                    ts,
                    slope: slope(ts),
                });
            }
        }

        Err(FlowError::ConvergenceFailed {
            what: "static temperature",
            iterations: self.max_iterations,
        })
    }

    fn solve(&self, input: &FlowInput<'_>) -> FlowResult<(GasProperties, StaticTemperature, f64)> {
        input.validate()?;
        let gas = input.composition.gas_properties();
        if !gas.is_physical() {
            return Err(FlowError::NotSupported {
                what: "composition with cp <= R",
            });
        }
        let tt = input.total_temperature.value;
        let pt = input.total_pressure.value;

        let stat = self.static_temperature(&gas, tt, input.mach)?;
        let entropy_drop = gas.entropy_function(stat.ts) - gas.entropy_function(tt);
        let ps = pt * (entropy_drop / gas.gas_constant).exp();
        if !ps.is_finite() || ps <= 0.0 {
            return Err(FlowError::NonPhysical {
                what: "static pressure",
            });
        }
        Ok((gas, stat, ps))
    }
}

impl FlowEvaluator for ThermallyPerfectFlow {
    fn name(&self) -> &str {
        "thermally-perfect-gas"
    }

    fn supports_composition(&self, comp: &Composition) -> bool {
        comp.gas_properties().is_physical()
    }

    fn evaluate(&self, input: &FlowInput<'_>) -> FlowResult<FlowStation> {
        let (gas, stat, ps) = self.solve(input)?;
        let tt = input.total_temperature.value;
        Ok(FlowStation::assemble(
            input,
            gas.gas_constant,
            StaticSolution {
                ts: stat.ts,
                ps,
                gamma: gas.gamma(stat.ts),
                total_enthalpy: gas.enthalpy(tt),
                static_enthalpy: gas.enthalpy(stat.ts),
            },
        ))
    }

    /// Implicit differentiation of the energy and entropy relations.
    ///
    /// `dTs/dTt = cp(Tt) / slope(Ts)`, Ts is independent of Pt, and
    /// `dPs/dTt = Ps (cp(Ts)/(R Ts) dTs/dTt - cp(Tt)/(R Tt))`, `dPs/dPt = Ps/Pt`.
    fn jacobian(&self, input: &FlowInput<'_>) -> FlowResult<Option<StaticJacobian>> {
        let (gas, stat, ps) = self.solve(input)?;
        let tt = input.total_temperature.value;
        let pt = input.total_pressure.value;
        let r = gas.gas_constant;

        let ts_tt = gas.cp(tt) / stat.slope;
        let ps_tt = ps * (gas.cp(stat.ts) / (r * stat.ts) * ts_tt - gas.cp(tt) / (r * tt));
        Ok(Some(StaticJacobian {
            ts_tt,
            ts_pt: 0.0,
            ps_tt,
            ps_pt: ps / pt,
        }))
    }
}
