//! Flow composition by mass fraction, with reactant mixing.

use crate::error::{FlowError, FlowResult};
use crate::gas::GasProperties;
use crate::species::Species;
use fc_core::numeric::{Tolerances, nearly_equal};

/// Fractions below this are dropped after normalization.
const NEGLIGIBLE_FRACTION: f64 = 1e-15;

/// Composition defined by normalized mass fractions.
///
/// The composition is always normalized (mass fractions sum to 1.0). Mass
/// fractions are used rather than mole fractions because reactant mixing is
/// specified as a mass ratio (e.g. fuel-air ratio).
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Species and their mass fractions (always normalized to sum=1).
    items: Vec<(Species, f64)>,
}

impl Default for Composition {
    fn default() -> Self {
        Self::air()
    }
}

impl Composition {
    /// Create a pure-species composition.
    pub fn pure(species: Species) -> Self {
        Self {
            items: vec![(species, 1.0)],
        }
    }

    /// Dry air, the default flight-condition inflow.
    pub fn air() -> Self {
        Self::pure(Species::Air)
    }

    /// Create a composition from mass fractions.
    ///
    /// Validates that all fractions are finite, non-negative, and have a positive sum,
    /// then merges duplicate species and normalizes to sum=1.
    pub fn new_mass_fractions(fractions: Vec<(Species, f64)>) -> FlowResult<Self> {
        if fractions.is_empty() {
            return Err(FlowError::InvalidComposition {
                what: "empty composition",
            });
        }

        let mut merged: Vec<(Species, f64)> = Vec::with_capacity(fractions.len());
        let mut sum = 0.0;
        for (species, frac) in fractions {
            if !frac.is_finite() {
                return Err(FlowError::InvalidComposition {
                    what: "non-finite mass fraction",
                });
            }
            if frac < 0.0 {
                return Err(FlowError::InvalidComposition {
                    what: "negative mass fraction",
                });
            }
            sum += frac;
            match merged.iter_mut().find(|(s, _)| *s == species) {
                Some((_, existing)) => *existing += frac,
                None => merged.push((species, frac)),
            }
        }

        if sum <= 0.0 || !sum.is_finite() {
            return Err(FlowError::InvalidComposition {
                what: "mass fractions sum to zero or non-finite",
            });
        }

        let normalized: Vec<(Species, f64)> = merged
            .into_iter()
            .map(|(s, f)| (s, f / sum))
            .filter(|(_, f)| *f > NEGLIGIBLE_FRACTION)
            .collect();

        if normalized.is_empty() {
            return Err(FlowError::InvalidComposition {
                what: "all mass fractions negligible",
            });
        }

        Ok(Self { items: normalized })
    }

    /// Mix `mix_ratio` kg of `reactant` into every kg of this composition.
    ///
    /// A zero ratio returns an unchanged copy.
    pub fn with_reactant(&self, reactant: &Composition, mix_ratio: f64) -> FlowResult<Self> {
        if !mix_ratio.is_finite() || mix_ratio < 0.0 {
            return Err(FlowError::InvalidComposition {
                what: "mix ratio must be finite and non-negative",
            });
        }
        if mix_ratio == 0.0 {
            return Ok(self.clone());
        }

        let fractions = self
            .iter()
            .chain(reactant.iter().map(|(s, f)| (s, f * mix_ratio)))
            .collect();
        Self::new_mass_fractions(fractions)
    }

    /// Get mass fraction of a species (0.0 if not present).
    pub fn mass_fraction(&self, species: Species) -> f64 {
        self.items
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    /// Check if this is a pure-species composition.
    ///
    /// Returns `Some(species)` if exactly one species has fraction ≈1.0.
    pub fn is_pure(&self) -> Option<Species> {
        if self.items.len() == 1 {
            let (species, frac) = self.items[0];
            let tol = Tolerances {
                abs: 1e-10,
                rel: 1e-10,
            };
            if nearly_equal(frac, 1.0, tol) {
                return Some(species);
            }
        }
        None
    }

    /// Iterate over all species with non-zero mass fractions.
    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.items.iter().copied()
    }

    /// Mixture molar mass [kg/kmol]: `1 / sum(y_i / M_i)`.
    pub fn molar_mass(&self) -> f64 {
        let inverse: f64 = self
            .items
            .iter()
            .map(|(species, y)| y / species.molar_mass())
            .sum();
        1.0 / inverse
    }

    /// Mass-weighted ideal-gas mixture properties.
    pub fn gas_properties(&self) -> GasProperties {
        self.items.iter().fold(
            GasProperties {
                gas_constant: 0.0,
                cp0: 0.0,
                cp1: 0.0,
            },
            |acc, (species, y)| {
                let r = species.gas_constant();
                let (a0, a1) = species.cp_fit();
                GasProperties {
                    gas_constant: acc.gas_constant + y * r,
                    cp0: acc.cp0 + y * r * a0,
                    cp1: acc.cp1 + y * r * a1,
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-10,
            rel: 1e-10,
        }
    }

    #[test]
    fn pure_composition() {
        let comp = Composition::pure(Species::O2);
        assert_eq!(comp.is_pure(), Some(Species::O2));
        assert_eq!(comp.mass_fraction(Species::O2), 1.0);
        assert_eq!(comp.mass_fraction(Species::N2), 0.0);
    }

    #[test]
    fn default_is_air() {
        assert_eq!(Composition::default().is_pure(), Some(Species::Air));
    }

    #[test]
    fn mixture_normalization_non_unit_sum() {
        let comp =
            Composition::new_mass_fractions(vec![(Species::O2, 2.0), (Species::N2, 8.0)]).unwrap();

        // Should normalize to 0.2 and 0.8
        assert!(nearly_equal(comp.mass_fraction(Species::O2), 0.2, tol()));
        assert!(nearly_equal(comp.mass_fraction(Species::N2), 0.8, tol()));
    }

    #[test]
    fn duplicates_are_merged() {
        let comp = Composition::new_mass_fractions(vec![
            (Species::N2, 1.0),
            (Species::O2, 1.0),
            (Species::N2, 2.0),
        ])
        .unwrap();
        assert_eq!(comp.iter().count(), 2);
        assert!(nearly_equal(comp.mass_fraction(Species::N2), 0.75, tol()));
    }

    #[test]
    fn invalid_negative_fraction() {
        let result = Composition::new_mass_fractions(vec![(Species::O2, -0.5), (Species::N2, 1.5)]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_zero_sum() {
        let result = Composition::new_mass_fractions(vec![(Species::O2, 0.0), (Species::N2, 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_non_finite() {
        let result = Composition::new_mass_fractions(vec![(Species::O2, f64::NAN)]);
        assert!(result.is_err());
    }

    #[test]
    fn reactant_mixing_by_mass() {
        let air = Composition::air();
        let fuel = Composition::pure(Species::JetA);
        let mixed = air.with_reactant(&fuel, 0.02).unwrap();
        assert!(nearly_equal(mixed.mass_fraction(Species::JetA), 0.02 / 1.02, tol()));
        assert!(nearly_equal(mixed.mass_fraction(Species::Air), 1.0 / 1.02, tol()));
        assert!(mixed.molar_mass() > air.molar_mass());
    }

    #[test]
    fn zero_mix_ratio_is_identity() {
        let air = Composition::air();
        let fuel = Composition::pure(Species::CH4);
        assert_eq!(air.with_reactant(&fuel, 0.0).unwrap(), air);
    }

    #[test]
    fn invalid_mix_ratio() {
        let air = Composition::air();
        let fuel = Composition::pure(Species::H2);
        assert!(air.with_reactant(&fuel, -0.1).is_err());
        assert!(air.with_reactant(&fuel, f64::INFINITY).is_err());
    }

    #[test]
    fn pure_gas_properties_match_species() {
        let props = Composition::pure(Species::N2).gas_properties();
        assert!(nearly_equal(props.gas_constant, Species::N2.gas_constant(), tol()));
        assert!(props.is_physical());
    }

    #[test]
    fn mixture_gas_constant_from_molar_mass() {
        let comp =
            Composition::new_mass_fractions(vec![(Species::N2, 0.7), (Species::CO2, 0.3)]).unwrap();
        let r_from_mass = fc_core::units::constants::R_UNIVERSAL / comp.molar_mass();
        assert!(nearly_equal(comp.gas_properties().gas_constant, r_from_mass, tol()));
    }
}
