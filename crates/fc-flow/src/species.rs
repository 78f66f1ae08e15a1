//! Chemical species definitions.

use fc_core::units::constants::R_UNIVERSAL;

/// Species available to flight-condition compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Dry air (pseudo-pure)
    Air,
    /// Nitrogen (N₂)
    N2,
    /// Oxygen (O₂)
    O2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Water vapor (H₂O)
    H2O,
    /// Methane (CH₄)
    CH4,
    /// Hydrogen (H₂)
    H2,
    /// Jet-A vapor, C12H23 surrogate
    JetA,
}

impl Species {
    pub const ALL: [Species; 9] = [
        Species::Air,
        Species::N2,
        Species::O2,
        Species::Ar,
        Species::CO2,
        Species::H2O,
        Species::CH4,
        Species::H2,
        Species::JetA,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::Air => "Air",
            Species::N2 => "N2",
            Species::O2 => "O2",
            Species::Ar => "Ar",
            Species::CO2 => "CO2",
            Species::H2O => "H2O",
            Species::CH4 => "CH4",
            Species::H2 => "H2",
            Species::JetA => "JetA",
        }
    }

    /// Molar mass [kg/kmol].
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::Air => 28.964_4,
            Species::N2 => 28.013_4,
            Species::O2 => 31.998_8,
            Species::Ar => 39.948,
            Species::CO2 => 44.009_5,
            Species::H2O => 18.015_28,
            Species::CH4 => 16.042_5,
            Species::H2 => 2.015_88,
            Species::JetA => 167.31,
        }
    }

    /// Specific gas constant [J/(kg K)].
    pub fn gas_constant(&self) -> f64 {
        R_UNIVERSAL / self.molar_mass()
    }

    /// Linear fit `cp/R = a0 + a1 T` over roughly 200-1000 K, as `(a0, a1 [1/K])`.
    pub fn cp_fit(&self) -> (f64, f64) {
        match self {
            Species::Air => (3.318, 6.3e-4),
            Species::N2 => (3.28, 6.5e-4),
            Species::O2 => (3.24, 9.9e-4),
            Species::Ar => (2.5, 0.0),
            Species::CO2 => (3.57, 3.0e-3),
            Species::H2O => (3.64, 1.33e-3),
            Species::CH4 => (2.47, 6.1e-3),
            Species::H2 => (3.40, 2.3e-4),
            Species::JetA => (17.5, 4.89e-2),
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
