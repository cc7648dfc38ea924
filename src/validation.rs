//! Self-validation against closed-form limits and published data.
//!
//! Each scenario is a boolean predicate comparing computed values with
//! reference constants to an absolute tolerance of [`TEST_PRECISION`]. Some
//! references are only given to three decimals, which sets the tolerance.
//!
//! [`run`] evaluates the whole battery, logs every failure by name and the
//! aggregate outcome, and hands back a [`Report`]. A failing scenario is
//! reported, never fatal.
//!
//! # Scenarios
//!
//! - ideal glass at normal incidence (Born & Wolf, Principles of Optics, 6th
//!   ed., sec. 1.5.2, eqns. 22-23)
//! - Brewster angle, high-to-low real indices
//! - critical angle, high-to-low real indices
//! - Fresnel rhomb eighth-wave angles (Born & Wolf, sec. 1.5, below eqn. 63)
//! - gold at 582 nm (Johnson & Christy, Phys. Rev. B 6, 4370, 1972)
//! - nickel at 632.8 nm (Chiu, Lee & Su, Appl. Opt. 38, 4047, 1999)

use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt;

use itertools::Itertools;
use num_complex::Complex64;

use crate::fresnel::{rp, rs, tp, ts};
use crate::polarization::{diattenuation, retardance};
use crate::powers::{reflectance_p, reflectance_s, transmittance_p, transmittance_s};

/// Absolute tolerance used by every scenario.
pub const TEST_PRECISION: f64 = 0.001;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_passes() {
        for (name, scenario) in SCENARIOS {
            assert!(scenario(), "scenario failed: {}", name);
        }
    }

    #[test]
    fn report_aggregates() {
        let report = run();
        assert_eq!(report.checks.len(), SCENARIOS.len());
        assert!(report.all_passed());
        assert!(report.failures().is_empty());
    }

    #[test]
    fn failed_check_is_reported_not_fatal() {
        let report = Report {
            checks: vec![
                Check {
                    name: "ok",
                    passed: true,
                },
                Check {
                    name: "broken",
                    passed: false,
                },
            ],
        };
        assert!(!report.all_passed());
        assert_eq!(report.failures(), vec!["broken"]);
        assert!(report.to_string().contains("broken: failed"));
    }

    #[test]
    fn compare_complex_checks_both_parts() {
        assert!(compare_complex(Complex64::new(0.5, 0.2), Complex64::new(0.5005, 0.1995)));
        assert!(!compare_complex(Complex64::new(0.5, 0.2), Complex64::new(0.5, 0.21)));
        assert!(!compare_complex(Complex64::new(0.5, 0.2), Complex64::new(0.49, 0.2)));
    }
}

/// Named scenario predicates, in reporting order.
pub const SCENARIOS: [(&str, fn() -> bool); 6] = [
    ("ideal_glass_normal", ideal_glass_normal),
    ("brewster", brewster),
    ("critical", critical),
    ("fresnel_rhomb", fresnel_rhomb),
    ("gold_582nm", gold_582nm),
    ("nickel_633nm", nickel_633nm),
];

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < TEST_PRECISION
}

/// Compares real and imaginary parts separately against [`TEST_PRECISION`].
pub fn compare_complex(actual: Complex64, expected: Complex64) -> bool {
    close(actual.re, expected.re) && close(actual.im, expected.im)
}

fn conserves_energy(n_inc: f64, n_sub: Complex64, theta: f64) -> bool {
    close(
        reflectance_s(n_inc, n_sub, theta) + transmittance_s(n_inc, n_sub, theta),
        1.0,
    ) && close(
        reflectance_p(n_inc, n_sub, theta) + transmittance_p(n_inc, n_sub, theta),
        1.0,
    )
}

/// Ideal glass, n = 1.5, at normal incidence.
pub fn ideal_glass_normal() -> bool {
    let (n1, n2, theta) = (1.0, Complex64::new(1.5, 0.0), 0.0);
    compare_complex(ts(n1, n2, theta), Complex64::new(0.8, 0.0))
        && compare_complex(tp(n1, n2, theta), Complex64::new(0.8, 0.0))
        && compare_complex(rs(n1, n2, theta), Complex64::new(-0.2, 0.0))
        && compare_complex(rp(n1, n2, theta), Complex64::new(0.2, 0.0))
        && close(reflectance_s(n1, n2, theta), 0.04)
        && close(reflectance_p(n1, n2, theta), 0.04)
        && close(transmittance_s(n1, n2, theta), 0.96)
        && close(transmittance_p(n1, n2, theta), 0.96)
        && close(
            diattenuation(reflectance_s(n1, n2, theta), reflectance_p(n1, n2, theta)),
            0.0,
        )
        && close(
            diattenuation(transmittance_s(n1, n2, theta), transmittance_p(n1, n2, theta)),
            0.0,
        )
        && close(retardance(ts(n1, n2, theta), tp(n1, n2, theta)), 0.0)
        && close(retardance(rs(n1, n2, theta), rp(n1, n2, theta)), PI)
}

/// Brewster angle: p-polarized reflection vanishes and transmission is total.
pub fn brewster() -> bool {
    let (n1, n2) = (1.72, Complex64::new(1.15, 0.0));
    let theta_b = (n2.re / n1).atan();
    compare_complex(rp(n1, n2, theta_b), Complex64::new(0.0, 0.0))
        && close(reflectance_p(n1, n2, theta_b), 0.0)
        && close(transmittance_p(n1, n2, theta_b), 1.0)
        && close(
            diattenuation(reflectance_s(n1, n2, theta_b), reflectance_p(n1, n2, theta_b)),
            1.0,
        )
}

/// Critical angle: both polarizations are totally reflected.
pub fn critical() -> bool {
    let (n1, n2) = (1.72, Complex64::new(1.15, 0.0));
    let theta_c = (n2.re / n1).asin();
    close(reflectance_s(n1, n2, theta_c), 1.0)
        && close(reflectance_p(n1, n2, theta_c), 1.0)
        && close(transmittance_s(n1, n2, theta_c), 0.0)
        && close(transmittance_p(n1, n2, theta_c), 0.0)
        && close(
            diattenuation(reflectance_s(n1, n2, theta_c), reflectance_p(n1, n2, theta_c)),
            0.0,
        )
}

/// Fresnel rhomb: eighth-wave reflected retardance at two angles past critical.
pub fn fresnel_rhomb() -> bool {
    let (n1, n2) = (1.51, Complex64::new(1.0, 0.0));
    // 48 deg 37 arc-min and 54 deg 37 arc-min
    [0.84852090, 0.95324066].into_iter().all(|theta| {
        close(retardance(rs(n1, n2, theta), rp(n1, n2, theta)), FRAC_PI_4)
            && conserves_energy(n1, n2, theta)
    })
}

/// Gold at 582 nm, 50 degrees incidence.
pub fn gold_582nm() -> bool {
    let (n1, n2, theta) = (1.0, Complex64::new(0.29006, 2.8628), 0.87266463);
    close(reflectance_s(n1, n2, theta), 0.92516)
        && close(reflectance_p(n1, n2, theta), 0.83233)
        && conserves_energy(n1, n2, theta)
}

/// Nickel at 632.8 nm, 60 degrees incidence.
pub fn nickel_633nm() -> bool {
    let (n1, n2, theta) = (1.0, Complex64::new(2.007, 3.781), 1.0471976);
    compare_complex(rs(n1, n2, theta), Complex64::new(-0.882373, -0.183978))
        && compare_complex(rp(n1, n2, theta), Complex64::new(0.462133, 0.492465))
        && close(retardance(rp(n1, n2, theta), rs(n1, n2, theta)), 3.7532)
        && conserves_energy(n1, n2, theta)
}

/// Outcome of one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Check {
    pub name: &'static str,
    pub passed: bool,
}

/// Outcome of the whole battery.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub checks: Vec<Check>,
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    pub fn failures(&self) -> Vec<&'static str> {
        self.checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| check.name)
            .collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            let outcome = if check.passed { "passed" } else { "failed" };
            writeln!(f, "{}: {}", check.name, outcome)?;
        }
        write!(f, "all fresnel tests passed? {}", self.all_passed())
    }
}

/// Runs every scenario, logging failures by name and the aggregate result.
pub fn run() -> Report {
    let checks: Vec<Check> = SCENARIOS
        .iter()
        .map(|&(name, scenario)| {
            let passed = scenario();
            if !passed {
                log::warn!("{}: failed", name);
            }
            Check { name, passed }
        })
        .collect();
    let report = Report { checks };

    if report.all_passed() {
        log::info!("all {} fresnel tests passed", report.checks.len());
    } else {
        log::warn!(
            "fresnel tests failed: {}",
            report.failures().iter().join(", ")
        );
    }
    report
}
