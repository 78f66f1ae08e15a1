//! Closed-form evaluation of a layered atmosphere.
//!
//! Within a layer of lapse rate `L` starting at `(h_b, T_b, P_b)`:
//! - gradient layer: `T = T_b + L (h - h_b)`, `P = P_b (T_b / T)^(g0 / (R L))`
//! - isothermal layer: `T = T_b`, `P = P_b exp(-g0 (h - h_b) / (R T_b))`
//!
//! Density follows from the ideal-gas law, speed of sound from `sqrt(gamma R T)`
//! and viscosity from Sutherland's law. Derivatives with respect to geometric
//! altitude are analytic: every layer satisfies the hydrostatic relation
//! `dP/dh = -P g0 / (R T)`, chained through `dh/dz = (r0 / (r0 + z))^2`.

use crate::error::{AtmosphereError, AtmosphereResult};
use crate::table::{AtmosphereTable, RangePolicy};
use fc_core::ensure_finite;
use fc_core::units::{
    Density, DynVisc, Length, Pressure, Temperature, Velocity, k, kg_per_m3, m, mps, pa, pa_s,
};

/// Lapse rates below this magnitude are treated as isothermal.
const ISOTHERMAL_LAPSE: f64 = 1e-12;

/// Static properties at one altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereProperties {
    /// Geometric altitude requested
    pub altitude: Length,
    /// Corresponding geopotential altitude
    pub geopotential_altitude: Length,
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub density: Density,
    pub speed_of_sound: Velocity,
    pub viscosity: DynVisc,
    /// True when the altitude lay outside `[floor, ceiling]` and the nearest
    /// layer law was continued.
    pub extrapolated: bool,
}

/// Partial derivatives of each output with respect to geometric altitude, per meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeDerivatives {
    /// dT/dz [K/m]
    pub temperature: f64,
    /// dP/dz [Pa/m]
    pub pressure: f64,
    /// drho/dz [kg/m^4]
    pub density: f64,
    /// da/dz [1/s]
    pub speed_of_sound: f64,
    /// dmu/dz [Pa s/m]
    pub viscosity: f64,
}

/// Reference state at a layer base, derived at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerBoundary {
    pub geopotential_altitude: Length,
    pub altitude: Length,
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub density: Density,
}

#[derive(Debug, Clone, Copy)]
struct Layer {
    base_h: f64,
    base_t: f64,
    base_p: f64,
    lapse: f64,
}

/// Raw SI state inside one layer.
#[derive(Debug, Clone, Copy)]
struct LayerState {
    t: f64,
    p: f64,
    lapse: f64,
}

/// Read-only atmosphere model; safe to share across threads.
#[derive(Debug, Clone)]
pub struct AtmosphereLookup {
    table: AtmosphereTable,
    layers: Vec<Layer>,
    gas_constant: f64,
}

impl AtmosphereLookup {
    /// Validate `table` and chain the layer base pressures from sea level.
    pub fn new(table: AtmosphereTable) -> AtmosphereResult<Self> {
        table.validate()?;
        let gas_constant = table.gas_constant();

        let mut layers: Vec<Layer> = Vec::with_capacity(table.layers.len());
        for spec in &table.layers {
            let (base_t, base_p) = match layers.last() {
                None => (table.sea_level_temperature_k, table.sea_level_pressure_pa),
                Some(below) => {
                    let state =
                        layer_state(below, spec.base_geopotential_m, table.g0_mps2, gas_constant);
                    (state.t, state.p)
                }
            };
            layers.push(Layer {
                base_h: spec.base_geopotential_m,
                base_t,
                base_p,
                lapse: spec.lapse_rate_k_per_m,
            });
        }

        Ok(Self {
            table,
            layers,
            gas_constant,
        })
    }

    /// Lookup over [`AtmosphereTable::us_standard_1976`].
    pub fn us_standard_1976() -> AtmosphereResult<Self> {
        Self::new(AtmosphereTable::us_standard_1976())
    }

    pub fn table(&self) -> &AtmosphereTable {
        &self.table
    }

    /// Accepted geometric altitude range `(floor, ceiling)`.
    pub fn domain(&self) -> (Length, Length) {
        (m(self.table.floor_m), m(self.table.ceiling_m))
    }

    /// Reference states at every layer base.
    pub fn boundaries(&self) -> Vec<LayerBoundary> {
        self.layers
            .iter()
            .map(|layer| LayerBoundary {
                geopotential_altitude: m(layer.base_h),
                altitude: m(self.table.geometric(layer.base_h)),
                temperature: k(layer.base_t),
                pressure: pa(layer.base_p),
                density: kg_per_m3(layer.base_p / (self.gas_constant * layer.base_t)),
            })
            .collect()
    }

    /// Static temperature, pressure, density, speed of sound and viscosity.
    pub fn evaluate(&self, altitude: Length) -> AtmosphereResult<AtmosphereProperties> {
        self.evaluate_with_derivatives(altitude)
            .map(|(properties, _)| properties)
    }

    /// Like [`evaluate`](Self::evaluate), plus analytic altitude derivatives.
    pub fn evaluate_with_derivatives(
        &self,
        altitude: Length,
    ) -> AtmosphereResult<(AtmosphereProperties, AltitudeDerivatives)> {
        let z = ensure_finite(altitude.value, "altitude")?;
        let extrapolated = self.check_domain(z)?;

        let h = self.table.geopotential(z);
        let layer = self.layer_for(h);
        let state = layer_state(layer, h, self.table.g0_mps2, self.gas_constant);
        if !(state.t > 0.0) || !(state.p > 0.0) || !state.p.is_finite() {
            return Err(AtmosphereError::NonPhysical {
                what: "extrapolated atmosphere state",
            });
        }

        let r = self.gas_constant;
        let gamma = self.table.gamma;
        let beta = self.table.sutherland_beta;
        let s = self.table.sutherland_temperature_k;
        let (t, p) = (state.t, state.p);

        let rho = p / (r * t);
        let a = (gamma * r * t).sqrt();
        let mu = beta * t.powf(1.5) / (t + s);

        let radius = self.table.earth_radius_m;
        let dh_dz = (radius / (radius + z)).powi(2);
        let dt_dh = state.lapse;
        let dp_dh = -p * self.table.g0_mps2 / (r * t);
        let drho_dh = rho * (dp_dh / p - dt_dh / t);
        let da_dh = a * dt_dh / (2.0 * t);
        let dmu_dh = mu * (1.5 / t - 1.0 / (t + s)) * dt_dh;

        let properties = AtmosphereProperties {
            altitude,
            geopotential_altitude: m(h),
            temperature: k(t),
            pressure: pa(p),
            density: kg_per_m3(rho),
            speed_of_sound: mps(a),
            viscosity: pa_s(mu),
            extrapolated,
        };
        let derivatives = AltitudeDerivatives {
            temperature: dt_dh * dh_dz,
            pressure: dp_dh * dh_dz,
            density: drho_dh * dh_dz,
            speed_of_sound: da_dh * dh_dz,
            viscosity: dmu_dh * dh_dz,
        };
        Ok((properties, derivatives))
    }

    /// Returns whether `z` needs extrapolation, or the policy's error.
    fn check_domain(&self, z: f64) -> AtmosphereResult<bool> {
        let (floor, ceiling) = (self.table.floor_m, self.table.ceiling_m);
        if (floor..=ceiling).contains(&z) {
            return Ok(false);
        }
        match self.table.policy {
            RangePolicy::Fail => Err(AtmosphereError::OutOfRangeAltitude {
                altitude_m: z,
                floor_m: floor,
                ceiling_m: ceiling,
            }),
            RangePolicy::Extrapolate if z <= -self.table.earth_radius_m => {
                Err(AtmosphereError::NonPhysical {
                    what: "altitude below the geopotential singularity",
                })
            }
            RangePolicy::Extrapolate => Ok(true),
        }
    }

    fn layer_for(&self, h: f64) -> &Layer {
        let idx = self
            .layers
            .partition_point(|layer| layer.base_h <= h)
            .saturating_sub(1);
        &self.layers[idx]
    }
}

fn layer_state(layer: &Layer, h: f64, g0: f64, r: f64) -> LayerState {
    let dh = h - layer.base_h;
    if layer.lapse.abs() < ISOTHERMAL_LAPSE {
        LayerState {
            t: layer.base_t,
            p: layer.base_p * (-g0 * dh / (r * layer.base_t)).exp(),
            lapse: 0.0,
        }
    } else {
        let t = layer.base_t + layer.lapse * dh;
        LayerState {
            t,
            p: layer.base_p * (layer.base_t / t).powf(g0 / (r * layer.lapse)),
            lapse: layer.lapse,
        }
    }
}
