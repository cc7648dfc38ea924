//! Interface parameters shared by the sweep, batch and command-line layers.
//!
//! The free functions in [`crate::fresnel`] and [`crate::powers`] take the
//! incident index, substrate index and angle as separate scalars. Callers that
//! evaluate many angles for one pair of media carry the pair around as an
//! [`Interface`].

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::ContractError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_contract() {
        let interface = Interface::new(1.0, Complex64::new(0.29006, 2.8628));
        assert!(interface.check(0.0).is_ok());
        assert!(interface.check(1.5).is_ok());
    }

    #[test]
    fn rejects_angle_outside_range() {
        let interface = Interface::new(1.0, 1.5);
        assert_eq!(interface.check(-0.1), Err(ContractError::Angle(-0.1)));
        assert_eq!(interface.check(FRAC_PI_2), Err(ContractError::Angle(FRAC_PI_2)));
        assert!(interface.check(f64::NAN).is_err());
    }

    #[test]
    fn rejects_bad_indices() {
        assert_eq!(
            Interface::new(0.0, 1.5).check(0.2),
            Err(ContractError::IncidentIndex(0.0))
        );
        assert_eq!(
            Interface::new(1.0, Complex64::new(-1.0, 0.5)).check(0.2),
            Err(ContractError::SubstrateIndex { re: -1.0, im: 0.5 })
        );
    }

    #[test]
    fn display() {
        let interface = Interface::new(1.0, Complex64::new(2.007, 3.781));
        assert_eq!(interface.to_string(), "n_inc = 1.000000, n_sub = 2.007000 + 3.781000i");
    }
}

/// A planar interface between a real incident medium and a (possibly
/// absorbing) substrate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub n_inc: f64,
    pub n_sub: Complex64,
}

impl Interface {
    pub fn new(n_inc: f64, n_sub: impl Into<Complex64>) -> Self {
        Self {
            n_inc,
            n_sub: n_sub.into(),
        }
    }

    /// Checks that the indices and `theta_inc` are inside the calculator's contract.
    ///
    /// The numeric layers never call this. Out-of-contract inputs there give
    /// whatever the arithmetic produces.
    pub fn check(&self, theta_inc: f64) -> Result<(), ContractError> {
        if !(self.n_inc.is_finite() && self.n_inc > 0.0) {
            return Err(ContractError::IncidentIndex(self.n_inc));
        }
        if !(self.n_sub.is_finite() && self.n_sub.re > 0.0) {
            return Err(ContractError::SubstrateIndex {
                re: self.n_sub.re,
                im: self.n_sub.im,
            });
        }
        if !(0.0..FRAC_PI_2).contains(&theta_inc) {
            return Err(ContractError::Angle(theta_inc));
        }
        Ok(())
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n_inc = {:.6}, n_sub = {:.6} + {:.6}i",
            self.n_inc, self.n_sub.re, self.n_sub.im
        )
    }
}
