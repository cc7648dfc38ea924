//! Quantity-versus-angle curves for plotting front-ends.
//!
//! A plotting consumer picks one [`Quantity`] and an [`Interface`], and asks
//! for its value over incidence angles from `0` to `pi/2`. The menu mirrors
//! what such a front-end offers: irradiance, diattenuation, retardance, and
//! the modulus, phase, real and imaginary parts of the amplitude, each for the
//! reflected and the transmitted direction. Single-polarization quantities
//! are s-polarized.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::batch;
use crate::fresnel::Amplitudes;
use crate::params::Interface;
use crate::polarization::{diattenuation, retardance};
use crate::powers::Powers;

/// Default number of sample angles in a sweep.
pub const DEFAULT_NUM_ANGLES: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64;

    #[test]
    fn names_round_trip() {
        for quantity in Quantity::ALL {
            let parsed: Quantity = quantity.name().parse().unwrap();
            assert_eq!(parsed, quantity);
        }
        assert!("reflected-colour".parse::<Quantity>().is_err());
    }

    #[test]
    fn sweep_spans_quarter_turn() {
        let curve = sweep(&Interface::new(1.0, 1.5), Quantity::ReflectedIrradiance, 11);
        assert_eq!(curve.angles.len(), 11);
        assert_eq!(curve.values.len(), 11);
        assert_abs_diff_eq!(curve.angles[0], 0.0);
        assert_abs_diff_eq!(curve.angles[10], FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.values[0], 0.04, epsilon = 1e-9);
    }

    #[test]
    fn reflected_retardance_at_normal_incidence() {
        let curve = sweep(&Interface::new(1.0, 1.5), Quantity::ReflectedRetardance, 5);
        assert_abs_diff_eq!(curve.values[0], std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn amplitude_parts_are_consistent() {
        let interface = Interface::new(1.0, Complex64::new(0.29006, 2.8628));
        let theta = 0.87266463;
        let re = Quantity::TransmittedAmplitudeReal.evaluate(&interface, theta);
        let im = Quantity::TransmittedAmplitudeImag.evaluate(&interface, theta);
        let abs = Quantity::TransmittedAmplitudeAbs.evaluate(&interface, theta);
        let phase = Quantity::TransmittedAmplitudePhase.evaluate(&interface, theta);
        assert_abs_diff_eq!(abs, re.hypot(im), epsilon = 1e-12);
        assert_abs_diff_eq!(phase, im.atan2(re), epsilon = 1e-12);
    }

    #[test]
    fn diattenuation_stays_in_unit_interval() {
        let interface = Interface::new(1.0, Complex64::new(2.007, 3.781));
        for quantity in [
            Quantity::ReflectedDiattenuation,
            Quantity::TransmittedDiattenuation,
        ] {
            let curve = sweep(&interface, quantity, 50);
            // the last sample sits at grazing incidence
            for value in curve.values.iter().take(49) {
                assert!((0.0..=1.0 + 1e-12).contains(value), "{}", value);
            }
        }
    }
}

/// A plottable quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quantity {
    ReflectedIrradiance,
    ReflectedDiattenuation,
    ReflectedRetardance,
    ReflectedAmplitudeAbs,
    ReflectedAmplitudePhase,
    ReflectedAmplitudeReal,
    ReflectedAmplitudeImag,
    TransmittedIrradiance,
    TransmittedDiattenuation,
    TransmittedRetardance,
    TransmittedAmplitudeAbs,
    TransmittedAmplitudePhase,
    TransmittedAmplitudeReal,
    TransmittedAmplitudeImag,
}

impl Quantity {
    pub const ALL: [Quantity; 14] = [
        Quantity::ReflectedIrradiance,
        Quantity::ReflectedDiattenuation,
        Quantity::ReflectedRetardance,
        Quantity::ReflectedAmplitudeAbs,
        Quantity::ReflectedAmplitudePhase,
        Quantity::ReflectedAmplitudeReal,
        Quantity::ReflectedAmplitudeImag,
        Quantity::TransmittedIrradiance,
        Quantity::TransmittedDiattenuation,
        Quantity::TransmittedRetardance,
        Quantity::TransmittedAmplitudeAbs,
        Quantity::TransmittedAmplitudePhase,
        Quantity::TransmittedAmplitudeReal,
        Quantity::TransmittedAmplitudeImag,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::ReflectedIrradiance => "reflected-irradiance",
            Quantity::ReflectedDiattenuation => "reflected-diattenuation",
            Quantity::ReflectedRetardance => "reflected-retardance",
            Quantity::ReflectedAmplitudeAbs => "reflected-amplitude-abs",
            Quantity::ReflectedAmplitudePhase => "reflected-amplitude-phase",
            Quantity::ReflectedAmplitudeReal => "reflected-amplitude-real",
            Quantity::ReflectedAmplitudeImag => "reflected-amplitude-imag",
            Quantity::TransmittedIrradiance => "transmitted-irradiance",
            Quantity::TransmittedDiattenuation => "transmitted-diattenuation",
            Quantity::TransmittedRetardance => "transmitted-retardance",
            Quantity::TransmittedAmplitudeAbs => "transmitted-amplitude-abs",
            Quantity::TransmittedAmplitudePhase => "transmitted-amplitude-phase",
            Quantity::TransmittedAmplitudeReal => "transmitted-amplitude-real",
            Quantity::TransmittedAmplitudeImag => "transmitted-amplitude-imag",
        }
    }

    /// Evaluates the quantity at one incidence angle.
    pub fn evaluate(&self, interface: &Interface, theta_inc: f64) -> f64 {
        let Interface { n_inc, n_sub } = *interface;
        let ampl = Amplitudes::new(n_inc, n_sub, theta_inc);
        match self {
            Quantity::ReflectedIrradiance => ampl.rs.norm_sqr(),
            Quantity::ReflectedDiattenuation => {
                diattenuation(ampl.rs.norm_sqr(), ampl.rp.norm_sqr())
            }
            Quantity::ReflectedRetardance => retardance(ampl.rs, ampl.rp),
            Quantity::ReflectedAmplitudeAbs => ampl.rs.norm(),
            Quantity::ReflectedAmplitudePhase => ampl.rs.arg(),
            Quantity::ReflectedAmplitudeReal => ampl.rs.re,
            Quantity::ReflectedAmplitudeImag => ampl.rs.im,
            Quantity::TransmittedIrradiance => {
                Powers::from_amplitudes(&ampl, n_inc, n_sub, theta_inc).ts
            }
            Quantity::TransmittedDiattenuation => {
                let powers = Powers::from_amplitudes(&ampl, n_inc, n_sub, theta_inc);
                diattenuation(powers.ts, powers.tp)
            }
            Quantity::TransmittedRetardance => retardance(ampl.ts, ampl.tp),
            Quantity::TransmittedAmplitudeAbs => ampl.ts.norm(),
            Quantity::TransmittedAmplitudePhase => ampl.ts.arg(),
            Quantity::TransmittedAmplitudeReal => ampl.ts.re,
            Quantity::TransmittedAmplitudeImag => ampl.ts.im,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quantity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Quantity::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| anyhow!("unknown quantity '{}'", s))
    }
}

/// One quantity sampled over incidence angle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub quantity: Quantity,
    pub interface: Interface,
    pub angles: Vec<f64>,
    pub values: Vec<f64>,
}

/// Samples `quantity` at `num_angles` evenly spaced angles over `[0, pi/2]`.
///
/// The end point is included, as a plot over the full quarter turn expects;
/// values at exactly grazing incidence may be `NaN` or meaningless.
pub fn sweep(interface: &Interface, quantity: Quantity, num_angles: usize) -> Curve {
    let angles = Array1::linspace(0.0, FRAC_PI_2, num_angles);
    let values = batch::par_evaluate(&angles, |theta| quantity.evaluate(interface, theta));
    Curve {
        quantity,
        interface: *interface,
        angles: angles.to_vec(),
        values: values.to_vec(),
    }
}
