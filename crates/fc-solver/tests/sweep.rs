//! Parallel and continuation sweeps.

use fc_atmosphere::AtmosphereLookup;
use fc_core::units::{ft, kgps};
use fc_flow::ThermallyPerfectFlow;
use fc_solver::{EquilibriumSolver, OperatingPoint, SolverConfig, SolverError};

fn schedule() -> Vec<OperatingPoint> {
    let altitudes: Vec<_> = (0..6).map(|i| ft(i as f64 * 8_000.0)).collect();
    OperatingPoint::grid(&altitudes, &[0.0, 0.3, 0.6, 0.9, 1.2], kgps(45.0))
}

#[test]
fn parallel_sweep_matches_serial_solves() {
    let lookup = AtmosphereLookup::us_standard_1976().unwrap();
    let flow = ThermallyPerfectFlow::default();
    let solver = EquilibriumSolver::new(&lookup, &flow, SolverConfig::default()).unwrap();

    let points = schedule();
    let swept = solver.sweep(&points);
    assert_eq!(swept.len(), points.len());
    for (point, result) in points.iter().zip(&swept) {
        let serial = solver.solve(point).unwrap();
        assert_eq!(result.as_ref().unwrap(), &serial);
    }
}

#[test]
fn failures_stay_local() {
    let lookup = AtmosphereLookup::us_standard_1976().unwrap();
    let flow = ThermallyPerfectFlow::default();
    let solver = EquilibriumSolver::new(&lookup, &flow, SolverConfig::default()).unwrap();

    let points = vec![
        OperatingPoint::new(ft(10_000.0), 0.5, kgps(20.0)),
        OperatingPoint::new(ft(500_000.0), 0.5, kgps(20.0)),
        OperatingPoint::new(ft(20_000.0), -1.0, kgps(20.0)),
        OperatingPoint::new(ft(30_000.0), 0.8, kgps(20.0)),
    ];
    let results = solver.sweep(&points);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(SolverError::OutOfRangeAltitude { .. })
    ));
    assert!(matches!(
        results[2],
        Err(SolverError::NonPhysicalInput { .. })
    ));
    assert!(results[3].is_ok());
}

#[test]
fn continuation_matches_cold_solves() {
    let lookup = AtmosphereLookup::us_standard_1976().unwrap();
    let flow = ThermallyPerfectFlow::default();
    let solver = EquilibriumSolver::new(&lookup, &flow, SolverConfig::default()).unwrap();

    let points: Vec<_> = (0..20)
        .map(|i| OperatingPoint::new(ft(30_000.0), 0.70 + 0.01 * i as f64, kgps(45.0)))
        .collect();
    let cold: usize = solver
        .sweep(&points)
        .iter()
        .map(|r| r.as_ref().unwrap().iterations)
        .sum();
    let warm = solver.continuation(&points);
    let warm_total: usize = warm.iter().map(|r| r.as_ref().unwrap().iterations).sum();
    assert!(warm_total <= cold, "warm {warm_total} vs cold {cold}");

    for (a, b) in warm.iter().zip(solver.sweep(&points)) {
        let (a, b) = (a.as_ref().unwrap(), b.unwrap());
        let dt = (a.total_temperature.value - b.total_temperature.value).abs();
        assert!(dt < 1e-7 * b.total_temperature.value);
    }
}
