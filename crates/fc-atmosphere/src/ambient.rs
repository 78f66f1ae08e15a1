//! Ambient static conditions: table lookup plus the temperature offset.
//!
//! Only the temperature target carries the offset. Pressure and density are
//! taken unchanged from the standard table at the same altitude, so an
//! off-standard day is not hydrostatically consistent. That is the documented
//! behavior of this model.

use crate::error::AtmosphereResult;
use crate::lookup::AtmosphereLookup;
use crate::offset::TemperatureOffset;
use fc_core::numeric::{ensure_finite, ensure_positive};
use fc_core::units::{Density, DynVisc, Length, Pressure, TempInterval, Temperature, Velocity};

/// Ambient state at one altitude and temperature delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientState {
    pub altitude: Length,
    pub temperature_delta: TempInterval,
    /// Table temperature before the offset
    pub standard_temperature: Temperature,
    /// `standard_temperature + temperature_delta`
    pub static_temperature: Temperature,
    pub static_pressure: Pressure,
    pub static_density: Density,
    /// Standard-day speed of sound
    pub speed_of_sound: Velocity,
    /// Standard-day viscosity
    pub viscosity: DynVisc,
    pub extrapolated: bool,
}

/// Sensitivities of the ambient outputs (SI, per meter of geometric altitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientDerivatives {
    pub static_temperature_altitude: f64,
    /// Always exactly 1
    pub static_temperature_delta: f64,
    pub static_pressure_altitude: f64,
    pub static_density_altitude: f64,
}

/// Pure function of `(altitude, delta)` over a shared lookup.
#[derive(Debug, Clone, Copy)]
pub struct Ambient<'a> {
    lookup: &'a AtmosphereLookup,
}

impl<'a> Ambient<'a> {
    pub fn new(lookup: &'a AtmosphereLookup) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &'a AtmosphereLookup {
        self.lookup
    }

    pub fn evaluate(
        &self,
        altitude: Length,
        delta: TempInterval,
    ) -> AtmosphereResult<AmbientState> {
        self.evaluate_with_derivatives(altitude, delta)
            .map(|(state, _)| state)
    }

    pub fn evaluate_with_derivatives(
        &self,
        altitude: Length,
        delta: TempInterval,
    ) -> AtmosphereResult<(AmbientState, AmbientDerivatives)> {
        ensure_finite(delta.value, "temperature delta")?;
        let (props, d) = self.lookup.evaluate_with_derivatives(altitude)?;

        let static_temperature = TemperatureOffset::apply(props.temperature, delta);
        ensure_positive(static_temperature.value, "effective static temperature")?;

        let partials = TemperatureOffset::partials();
        let state = AmbientState {
            altitude,
            temperature_delta: delta,
            standard_temperature: props.temperature,
            static_temperature,
            static_pressure: props.pressure,
            static_density: props.density,
            speed_of_sound: props.speed_of_sound,
            viscosity: props.viscosity,
            extrapolated: props.extrapolated,
        };
        let derivatives = AmbientDerivatives {
            static_temperature_altitude: partials.standard * d.temperature,
            static_temperature_delta: partials.delta,
            static_pressure_altitude: d.pressure,
            static_density_altitude: d.density,
        };
        Ok((state, derivatives))
    }
}
