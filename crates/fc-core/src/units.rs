// fc-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, MassRate as UomMassRate, Pressure as UomPressure,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::psi;
    Pressure::new::<psi>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn deg_r(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_rankine;
    Temperature::new::<degree_rankine>(v)
}

#[inline]
pub fn delta_k(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn delta_deg_r(v: f64) -> TempInterval {
    use uom::si::temperature_interval::degree_rankine;
    TempInterval::new::<degree_rankine>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn lbm_per_s(v: f64) -> MassRate {
    use uom::si::mass_rate::pound_per_second;
    MassRate::new::<pound_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

pub mod constants {
    /// Standard gravity [m/s^2]
    pub const G0_MPS2: f64 = 9.806_65;

    /// Universal gas constant used by the 1976 standard [J/(kmol K)]
    pub const R_UNIVERSAL: f64 = 8_314.32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _mdot = kgps(1.2);
        let _l = m(2.0);
        let _a = m2(0.5);
        let _rho = kg_per_m3(1.225);
        let _v = mps(340.0);
        let _mu = pa_s(1.8e-5);
    }

    #[test]
    fn imperial_constructors_store_si() {
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        assert!(nearly_equal(ft(1.0).value, 0.3048, tol));
        assert!(nearly_equal(deg_r(518.67).value, 288.15, tol));
        assert!(nearly_equal(delta_deg_r(9.0).value, 5.0, tol));
        assert!(nearly_equal(
            psi(14.696).value,
            101_325.35,
            Tolerances { abs: 0.1, rel: 0.0 }
        ));
        // uom carries the avoirdupois pound to seven digits
        assert!(nearly_equal(
            lbm_per_s(1.0).value,
            0.453_592_37,
            Tolerances { abs: 0.0, rel: 1e-7 }
        ));
        assert!(nearly_equal(delta_k(2.5).value, 2.5, tol));
    }
}
