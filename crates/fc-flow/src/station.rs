//! Flow evaluator inputs and outputs.

use crate::composition::Composition;
use crate::error::{FlowError, FlowResult};
use crate::gas::SpecEnthalpy;
use fc_core::units::{
    Area, Density, MassRate, Pressure, Temperature, Velocity, k, kg_per_m3, m2, mps, pa,
};

/// Total conditions plus the fixed flow parameters of one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct FlowInput<'a> {
    pub total_pressure: Pressure,
    pub total_temperature: Temperature,
    pub mach: f64,
    pub mass_flow: MassRate,
    pub composition: &'a Composition,
}

impl<'a> FlowInput<'a> {
    pub fn new(
        total_pressure: Pressure,
        total_temperature: Temperature,
        mach: f64,
        mass_flow: MassRate,
        composition: &'a Composition,
    ) -> Self {
        Self {
            total_pressure,
            total_temperature,
            mach,
            mass_flow,
            composition,
        }
    }

    /// Reject non-physical inputs before any property evaluation.
    pub fn validate(&self) -> FlowResult<()> {
        let pt = self.total_pressure.value;
        if !pt.is_finite() || pt <= 0.0 {
            return Err(FlowError::NonPhysical {
                what: "total pressure must be positive and finite",
            });
        }
        let tt = self.total_temperature.value;
        if !tt.is_finite() || tt <= 0.0 {
            return Err(FlowError::NonPhysical {
                what: "total temperature must be positive and finite",
            });
        }
        if !self.mach.is_finite() || self.mach < 0.0 {
            return Err(FlowError::NonPhysical {
                what: "Mach number must be non-negative and finite",
            });
        }
        let w = self.mass_flow.value;
        if !w.is_finite() || w <= 0.0 {
            return Err(FlowError::NonPhysical {
                what: "mass flow must be positive and finite",
            });
        }
        Ok(())
    }
}

/// Total and static state of a flow at a given Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowStation {
    pub total_pressure: Pressure,
    pub total_temperature: Temperature,
    pub total_enthalpy: SpecEnthalpy,
    pub static_pressure: Pressure,
    pub static_temperature: Temperature,
    pub static_density: Density,
    pub static_enthalpy: SpecEnthalpy,
    /// Heat capacity ratio at the static state
    pub gamma: f64,
    /// Speed of sound at the static state
    pub speed_of_sound: Velocity,
    pub velocity: Velocity,
    pub mach: f64,
    /// Confirmed mass flow (passed through unchanged)
    pub mass_flow: MassRate,
    /// `W / (rho V)`; `None` when the flow is at rest
    pub area: Option<Area>,
}

/// Static state solved by an evaluator, in SI units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StaticSolution {
    pub ts: f64,
    pub ps: f64,
    pub gamma: f64,
    pub total_enthalpy: f64,
    pub static_enthalpy: f64,
}

impl FlowStation {
    /// Derive density, velocity and area from a static solution.
    pub(crate) fn assemble(input: &FlowInput<'_>, gas_constant: f64, sol: StaticSolution) -> Self {
        let rho = sol.ps / (gas_constant * sol.ts);
        let a = (sol.gamma * gas_constant * sol.ts).sqrt();
        let v = input.mach * a;
        let area = (v > 0.0).then(|| m2(input.mass_flow.value / (rho * v)));
        Self {
            total_pressure: input.total_pressure,
            total_temperature: input.total_temperature,
            total_enthalpy: sol.total_enthalpy,
            static_pressure: pa(sol.ps),
            static_temperature: k(sol.ts),
            static_density: kg_per_m3(rho),
            static_enthalpy: sol.static_enthalpy,
            gamma: sol.gamma,
            speed_of_sound: mps(a),
            velocity: mps(v),
            mach: input.mach,
            mass_flow: input.mass_flow,
            area,
        }
    }
}

/// Partial derivatives of static temperature and pressure with respect to
/// total temperature and pressure (SI units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticJacobian {
    /// dTs/dTt [-]
    pub ts_tt: f64,
    /// dTs/dPt [K/Pa]
    pub ts_pt: f64,
    /// dPs/dTt [Pa/K]
    pub ps_tt: f64,
    /// dPs/dPt [-]
    pub ps_pt: f64,
}

impl StaticJacobian {
    /// Row-major `[[Ts_Tt, Ts_Pt], [Ps_Tt, Ps_Pt]]`.
    pub fn rows(&self) -> [[f64; 2]; 2] {
        [[self.ts_tt, self.ts_pt], [self.ps_tt, self.ps_pt]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::units::{k, kgps, pa};

    #[test]
    fn validate_accepts_physical_input() {
        let air = Composition::air();
        let input = FlowInput::new(pa(101_325.0), k(288.15), 0.0, kgps(1.0), &air);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn validate_rejects_each_bad_field() {
        let air = Composition::air();
        let good = FlowInput::new(pa(101_325.0), k(288.15), 0.5, kgps(1.0), &air);

        let bad = [
            FlowInput {
                total_pressure: pa(0.0),
                ..good
            },
            FlowInput {
                total_temperature: k(-1.0),
                ..good
            },
            FlowInput { mach: -0.1, ..good },
            FlowInput {
                mach: f64::NAN,
                ..good
            },
            FlowInput {
                mass_flow: kgps(0.0),
                ..good
            },
        ];
        for input in bad {
            assert!(matches!(
                input.validate(),
                Err(FlowError::NonPhysical { .. })
            ));
        }
    }

    #[test]
    fn jacobian_rows() {
        let jac = StaticJacobian {
            ts_tt: 1.0,
            ts_pt: 2.0,
            ps_tt: 3.0,
            ps_pt: 4.0,
        };
        assert_eq!(jac.rows(), [[1.0, 2.0], [3.0, 4.0]]);
    }
}
