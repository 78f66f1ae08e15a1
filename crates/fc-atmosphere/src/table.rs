//! Standard-atmosphere layer data.
//!
//! A table is a sea-level reference state plus an ordered list of layers, each
//! defined by its base geopotential altitude and a constant temperature lapse
//! rate. Pressure and density are never tabulated: they follow from the layer
//! law and are chained from the sea-level reference once, when an
//! [`AtmosphereLookup`](crate::AtmosphereLookup) is built.

use crate::error::{AtmosphereError, AtmosphereResult};
use fc_core::units::Length;
use fc_core::units::constants::{G0_MPS2, R_UNIVERSAL};

/// What to do with altitudes outside `[floor, ceiling]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangePolicy {
    /// Reject with `AtmosphereError::OutOfRangeAltitude`.
    #[default]
    Fail,
    /// Continue the nearest layer's law and flag the result as extrapolated.
    Extrapolate,
}

/// One layer: constant lapse rate from `base_geopotential_m` up to the next base.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerSpec {
    /// Base geopotential altitude [m]
    pub base_geopotential_m: f64,
    /// Temperature lapse rate dT/dh [K/m] (zero for isothermal layers)
    pub lapse_rate_k_per_m: f64,
}

impl LayerSpec {
    pub const fn new(base_geopotential_m: f64, lapse_rate_k_per_m: f64) -> Self {
        Self {
            base_geopotential_m,
            lapse_rate_k_per_m,
        }
    }
}

/// Versioned atmosphere definition. Immutable once handed to a lookup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtmosphereTable {
    /// Human-readable version label
    pub name: String,
    /// Temperature at the first layer base [K]
    pub sea_level_temperature_k: f64,
    /// Pressure at the first layer base [Pa]
    pub sea_level_pressure_pa: f64,
    /// Mean molar mass of air [kg/kmol]
    pub molar_mass_kg_per_kmol: f64,
    /// Heat capacity ratio used for the speed of sound
    pub gamma: f64,
    /// Gravitational acceleration at sea level [m/s^2]
    pub g0_mps2: f64,
    /// Effective earth radius for the geopotential conversion [m]
    pub earth_radius_m: f64,
    /// Sutherland viscosity constant [kg/(m s K^0.5)]
    pub sutherland_beta: f64,
    /// Sutherland temperature [K]
    pub sutherland_temperature_k: f64,
    /// Layers ordered by increasing base altitude; the first base must be zero
    pub layers: Vec<LayerSpec>,
    /// Top of the last layer [m geopotential]
    pub top_geopotential_m: f64,
    /// Lowest accepted geometric altitude [m]
    pub floor_m: f64,
    /// Highest accepted geometric altitude [m]
    pub ceiling_m: f64,
    /// Out-of-domain behavior
    pub policy: RangePolicy,
}

const US1976_LAYERS: [LayerSpec; 7] = [
    LayerSpec::new(0.0, -0.0065),
    LayerSpec::new(11_000.0, 0.0),
    LayerSpec::new(20_000.0, 0.001),
    LayerSpec::new(32_000.0, 0.0028),
    LayerSpec::new(47_000.0, 0.0),
    LayerSpec::new(51_000.0, -0.0028),
    LayerSpec::new(71_000.0, -0.002),
];

const US1976_TOP_GEOPOTENTIAL_M: f64 = 84_852.0;
const US1976_EARTH_RADIUS_M: f64 = 6_356_766.0;

impl AtmosphereTable {
    /// US Standard Atmosphere 1976, sea level to 84.852 km geopotential.
    pub fn us_standard_1976() -> Self {
        Self {
            name: "US Standard Atmosphere 1976".to_string(),
            sea_level_temperature_k: 288.15,
            sea_level_pressure_pa: 101_325.0,
            molar_mass_kg_per_kmol: 28.964_4,
            gamma: 1.4,
            g0_mps2: G0_MPS2,
            earth_radius_m: US1976_EARTH_RADIUS_M,
            sutherland_beta: 1.458e-6,
            sutherland_temperature_k: 110.4,
            layers: US1976_LAYERS.to_vec(),
            top_geopotential_m: US1976_TOP_GEOPOTENTIAL_M,
            floor_m: 0.0,
            ceiling_m: geopotential_to_geometric(US1976_TOP_GEOPOTENTIAL_M, US1976_EARTH_RADIUS_M),
            policy: RangePolicy::Fail,
        }
    }

    pub fn with_floor(mut self, floor: Length) -> Self {
        self.floor_m = floor.value;
        self
    }

    pub fn with_ceiling(mut self, ceiling: Length) -> Self {
        self.ceiling_m = ceiling.value;
        self
    }

    pub fn with_policy(mut self, policy: RangePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Specific gas constant R*/M0 [J/(kg K)].
    pub fn gas_constant(&self) -> f64 {
        R_UNIVERSAL / self.molar_mass_kg_per_kmol
    }

    /// Geometric altitude [m] to geopotential altitude [m].
    pub fn geopotential(&self, geometric_m: f64) -> f64 {
        self.earth_radius_m * geometric_m / (self.earth_radius_m + geometric_m)
    }

    /// Geopotential altitude [m] to geometric altitude [m].
    pub fn geometric(&self, geopotential_m: f64) -> f64 {
        geopotential_to_geometric(geopotential_m, self.earth_radius_m)
    }

    /// Check structural and physical consistency.
    ///
    /// Layer temperatures are checked at every base and at the top, so a table
    /// that passes never produces a non-positive temperature inside its domain.
    pub fn validate(&self) -> AtmosphereResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.sea_level_temperature_k) || !positive(self.sea_level_pressure_pa) {
            return Err(AtmosphereError::InvalidTable {
                what: "sea-level reference must be positive and finite",
            });
        }
        if !positive(self.molar_mass_kg_per_kmol)
            || !positive(self.g0_mps2)
            || !positive(self.earth_radius_m)
            || !positive(self.sutherland_beta)
            || !positive(self.sutherland_temperature_k)
        {
            return Err(AtmosphereError::InvalidTable {
                what: "physical constants must be positive and finite",
            });
        }
        if !(self.gamma.is_finite() && self.gamma > 1.0) {
            return Err(AtmosphereError::InvalidTable {
                what: "gamma must exceed 1",
            });
        }

        let Some(first) = self.layers.first() else {
            return Err(AtmosphereError::InvalidTable { what: "no layers" });
        };
        if first.base_geopotential_m != 0.0 {
            return Err(AtmosphereError::InvalidTable {
                what: "first layer must start at sea level",
            });
        }

        let mut temperature = self.sea_level_temperature_k;
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.base_geopotential_m.is_finite() || !layer.lapse_rate_k_per_m.is_finite() {
                return Err(AtmosphereError::InvalidTable {
                    what: "non-finite layer data",
                });
            }
            let top = self
                .layers
                .get(i + 1)
                .map_or(self.top_geopotential_m, |next| next.base_geopotential_m);
            if !(top > layer.base_geopotential_m) {
                return Err(AtmosphereError::InvalidTable {
                    what: "layer bases must be strictly increasing and below the top",
                });
            }
            temperature += layer.lapse_rate_k_per_m * (top - layer.base_geopotential_m);
            if !(temperature > 0.0) {
                return Err(AtmosphereError::InvalidTable {
                    what: "layer temperature must stay positive",
                });
            }
        }

        if !self.floor_m.is_finite() || !self.ceiling_m.is_finite() {
            return Err(AtmosphereError::InvalidTable {
                what: "non-finite domain",
            });
        }
        if !(self.floor_m < self.ceiling_m) {
            return Err(AtmosphereError::InvalidTable {
                what: "floor must be below ceiling",
            });
        }
        if self.floor_m <= -self.earth_radius_m {
            return Err(AtmosphereError::InvalidTable {
                what: "floor below the geopotential singularity",
            });
        }
        // Small slack for the geometric/geopotential round trip.
        if self.geopotential(self.ceiling_m) > self.top_geopotential_m * (1.0 + 1e-12) {
            return Err(AtmosphereError::InvalidTable {
                what: "ceiling above the top layer",
            });
        }

        Ok(())
    }
}

fn geopotential_to_geometric(geopotential_m: f64, earth_radius_m: f64) -> f64 {
    earth_radius_m * geopotential_m / (earth_radius_m - geopotential_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::numeric::{Tolerances, nearly_equal};
    use fc_core::units::ft;

    #[test]
    fn us1976_is_valid() {
        let table = AtmosphereTable::us_standard_1976();
        table.validate().unwrap();
        assert_eq!(table.layers.len(), 7);
        assert_eq!(table.policy, RangePolicy::Fail);
    }

    #[test]
    fn gas_constant_matches_standard() {
        let table = AtmosphereTable::us_standard_1976();
        let tol = Tolerances {
            abs: 0.0,
            rel: 1e-6,
        };
        assert!(nearly_equal(table.gas_constant(), 287.053, tol));
    }

    #[test]
    fn geopotential_round_trip() {
        let table = AtmosphereTable::us_standard_1976();
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-12,
        };
        for z in [-500.0, 0.0, 9_144.0, 50_000.0, 86_000.0] {
            let h = table.geopotential(z);
            assert!(nearly_equal(table.geometric(h), z, tol));
        }
        // geopotential is below geometric above sea level
        assert!(table.geopotential(10_000.0) < 10_000.0);
    }

    #[test]
    fn ceiling_is_about_86_km() {
        let table = AtmosphereTable::us_standard_1976();
        assert!((table.ceiling_m - 86_000.0).abs() < 10.0);
    }

    #[test]
    fn rejects_unsorted_layers() {
        let mut table = AtmosphereTable::us_standard_1976();
        table.layers.swap(1, 2);
        assert!(matches!(
            table.validate(),
            Err(AtmosphereError::InvalidTable { .. })
        ));
    }

    #[test]
    fn rejects_layer_freezing_below_zero_kelvin() {
        let mut table = AtmosphereTable::us_standard_1976();
        table.layers[1].lapse_rate_k_per_m = -0.1;
        assert_eq!(
            table.validate(),
            Err(AtmosphereError::InvalidTable {
                what: "layer temperature must stay positive"
            })
        );
    }

    #[test]
    fn rejects_ceiling_above_top() {
        let table = AtmosphereTable::us_standard_1976().with_ceiling(ft(500_000.0));
        assert!(table.validate().is_err());
    }

    #[test]
    fn rejects_inverted_domain() {
        let table = AtmosphereTable::us_standard_1976()
            .with_floor(ft(40_000.0))
            .with_ceiling(ft(30_000.0));
        assert!(table.validate().is_err());
    }

    #[test]
    fn builder_sets_domain_and_policy() {
        let table = AtmosphereTable::us_standard_1976()
            .with_floor(ft(-1_000.0))
            .with_ceiling(ft(100_000.0))
            .with_policy(RangePolicy::Extrapolate);
        table.validate().unwrap();
        assert!((table.floor_m + 304.8).abs() < 1e-9);
        assert_eq!(table.policy, RangePolicy::Extrapolate);
    }
}
