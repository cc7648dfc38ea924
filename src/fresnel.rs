//! Fresnel amplitude equations for a planar interface.
//!
//! This module implements the Fresnel equations for the complex ratios of
//! reflected and transmitted electric-field amplitude to incident amplitude,
//! for s-polarized (perpendicular) and p-polarized (parallel) light. The
//! incident medium is real-valued; the substrate may be absorbing.
//!
//! All four coefficients are written in terms of the relative index
//! `n = n_sub / n_inc` and the shared term `w = sqrt(n^2 - sin^2(theta))`:
//! - `rs = (c - w) / (c + w)`
//! - `rp = (n^2 c - w) / (n^2 c + w)`
//! - `ts = 2c / (c + w)`
//! - `tp = 2nc / (n^2 c + w)`
//!
//! with `c = cos(theta)`. The square root is the principal complex root
//! (non-negative real part), which fixes the sign of the reflected phase and
//! therefore every retardance computed from these values.
//!
//! Degenerate denominators yield `Inf`/`NaN`. Nothing here panics.

use num_complex::Complex64;

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn assert_complex(actual: Complex64, expected: Complex64) {
        assert_abs_diff_eq!(actual.re, expected.re, epsilon = 1e-6);
        assert_abs_diff_eq!(actual.im, expected.im, epsilon = 1e-6);
    }

    #[test]
    fn ideal_glass_normal() {
        assert_complex(rs(1.0, 1.5, 0.0), Complex64::new(-0.2, 0.0));
        assert_complex(rp(1.0, 1.5, 0.0), Complex64::new(0.2, 0.0));
        assert_complex(ts(1.0, 1.5, 0.0), Complex64::new(0.8, 0.0));
        assert_complex(tp(1.0, 1.5, 0.0), Complex64::new(0.8, 0.0));
    }

    #[test]
    fn reflected_phase_sign_at_normal_incidence() {
        // the imaginary part must be +0 so that the phase is +pi, not -pi
        let r = rs(1.0, 1.5, 0.0);
        assert!(r.im.is_sign_positive());
        assert_abs_diff_eq!(r.arg(), PI, epsilon = 1e-12);
    }

    #[test]
    fn matched_media_no_reflection() {
        let n_sub = Complex64::new(1.4, 0.0);
        for theta in [0.0, 0.3, 0.9, 1.4] {
            assert_complex(rs(1.4, n_sub, theta), Complex64::new(0.0, 0.0));
            assert_complex(rp(1.4, n_sub, theta), Complex64::new(0.0, 0.0));
            assert_complex(ts(1.4, n_sub, theta), Complex64::new(1.0, 0.0));
            assert_complex(tp(1.4, n_sub, theta), Complex64::new(1.0, 0.0));
        }
    }

    #[test]
    fn nickel_633nm() {
        let n_sub = Complex64::new(2.007, 3.781);
        let theta = 1.0471976;
        assert_abs_diff_eq!(rs(1.0, n_sub, theta).re, -0.882373, epsilon = 1e-3);
        assert_abs_diff_eq!(rs(1.0, n_sub, theta).im, -0.183978, epsilon = 1e-3);
        assert_abs_diff_eq!(rp(1.0, n_sub, theta).re, 0.462133, epsilon = 1e-3);
        assert_abs_diff_eq!(rp(1.0, n_sub, theta).im, 0.492465, epsilon = 1e-3);
    }

    #[test]
    fn transmission_identities() {
        // boundary conditions: ts = 1 + rs and n tp = 1 + rp
        let n_sub = Complex64::new(0.29006, 2.8628);
        let theta = 0.87266463;
        let n = n_sub / 1.0;
        assert_complex(ts(1.0, n_sub, theta), 1.0 + rs(1.0, n_sub, theta));
        assert_complex(tp(1.0, n_sub, theta) * n, 1.0 + rp(1.0, n_sub, theta));
    }

    #[test]
    fn bundle_matches_free_functions() {
        let n_sub = Complex64::new(2.007, 3.781);
        let theta = 0.6;
        let ampl = Amplitudes::new(1.2, n_sub, theta);
        assert_eq!(ampl.rs, rs(1.2, n_sub, theta));
        assert_eq!(ampl.rp, rp(1.2, n_sub, theta));
        assert_eq!(ampl.ts, ts(1.2, n_sub, theta));
        assert_eq!(ampl.tp, tp(1.2, n_sub, theta));
    }

    #[test]
    fn degenerate_input_does_not_panic() {
        // zero incident index divides by zero
        let r = rs(0.0, 1.5, 0.3);
        assert!(r.re.is_nan() || r.re.is_infinite() || r.im.is_nan());
    }
}

/// Relative index, `cos(theta)` and the shared root `sqrt(n^2 - sin^2(theta))`.
///
/// Every coefficient below starts from the same three terms, and they are
/// built in the same operation order everywhere so that the free functions
/// and [`Amplitudes::new`] agree bit for bit.
struct Terms {
    n: Complex64,
    n_sq: Complex64,
    cos_inc: f64,
    root: Complex64,
}

impl Terms {
    fn new(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> Self {
        let n = n_sub / n_inc;
        let n_sq = n * n;
        let sin_inc = theta_inc.sin();
        let root = (n_sq - sin_inc * sin_inc).sqrt();
        Self {
            n,
            n_sq,
            cos_inc: theta_inc.cos(),
            root,
        }
    }

    fn rs(&self) -> Complex64 {
        (self.cos_inc - self.root) / (self.cos_inc + self.root)
    }

    fn rp(&self) -> Complex64 {
        let num = self.n_sq * self.cos_inc;
        (num - self.root) / (num + self.root)
    }

    fn ts(&self) -> Complex64 {
        2.0 * self.cos_inc / (self.cos_inc + self.root)
    }

    fn tp(&self) -> Complex64 {
        (2.0 * self.n * self.cos_inc) / (self.n_sq * self.cos_inc + self.root)
    }
}

/// Electric field amplitude, s-polarized, reflected.
pub fn rs(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> Complex64 {
    Terms::new(n_inc, n_sub.into(), theta_inc).rs()
}

/// Electric field amplitude, p-polarized, reflected.
///
/// Vanishes at the Brewster angle `atan(n_sub / n_inc)` for real indices.
pub fn rp(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> Complex64 {
    Terms::new(n_inc, n_sub.into(), theta_inc).rp()
}

/// Electric field amplitude, s-polarized, transmitted.
pub fn ts(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> Complex64 {
    Terms::new(n_inc, n_sub.into(), theta_inc).ts()
}

/// Electric field amplitude, p-polarized, transmitted.
pub fn tp(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> Complex64 {
    Terms::new(n_inc, n_sub.into(), theta_inc).tp()
}

/// All four Fresnel amplitude coefficients for one interface and angle.
///
/// **Context**: Consumers that need several coefficients at once (the sweep
/// and the CLI report) would otherwise rebuild the same square root four times.
///
/// **How it Works**: Builds the shared terms once and evaluates each formula
/// from them. The values are identical to the free functions [`rs`], [`rp`],
/// [`ts`] and [`tp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amplitudes {
    pub rs: Complex64,
    pub rp: Complex64,
    pub ts: Complex64,
    pub tp: Complex64,
}

impl Amplitudes {
    pub fn new(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> Self {
        let terms = Terms::new(n_inc, n_sub.into(), theta_inc);
        Self {
            rs: terms.rs(),
            rp: terms.rp(),
            ts: terms.ts(),
            tp: terms.tp(),
        }
    }
}
