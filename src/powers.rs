//! Fresnel irradiance (power) coefficients and the interface energy budget.
//!
//! Reflected irradiance is simply the squared modulus of the reflected
//! amplitude. Transmitted irradiance is not: the squared amplitude must be
//! weighted by the ratio of real power flux normal to the interface on either
//! side. For an absorbing substrate that ratio differs between s and p
//! polarization, and only the correct weighting keeps `R + T = 1`.
//!
//! # Energy budget
//!
//! - s: `Rs + Ts = 1`
//! - p: `Rp + Tp = 1`
//!
//! [`Powers::missing_s`] and [`Powers::missing_p`] report the residuals, which
//! sit at rounding level for every in-contract input.

use std::fmt;

use num_complex::Complex64;

use crate::fresnel::{self, Amplitudes};
use crate::snell::snell_angle;


/// Flux weighting for s polarization: `Re(n_sub cos(theta_sub)) / (n_inc cos(theta_inc))`.
fn flux_scale_s(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> f64 {
    let cos_sub = snell_angle(n_inc, n_sub, theta_inc).cos();
    (n_sub * cos_sub).re / (n_inc * theta_inc.cos())
}

/// Flux weighting for p polarization. Uses `Re(n_sub) Re(cos) + Im(n_sub) Im(cos)`,
/// i.e. `Re(conj(n_sub) cos(theta_sub))`, in place of the s-polarized numerator.
fn flux_scale_p(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> f64 {
    let cos_sub = snell_angle(n_inc, n_sub, theta_inc).cos();
    (n_sub.re * cos_sub.re + n_sub.im * cos_sub.im) / (n_inc * theta_inc.cos())
}

/// Irradiance, s-polarized, reflected.
pub fn reflectance_s(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> f64 {
    fresnel::rs(n_inc, n_sub, theta_inc).norm_sqr()
}

/// Irradiance, p-polarized, reflected.
pub fn reflectance_p(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> f64 {
    fresnel::rp(n_inc, n_sub, theta_inc).norm_sqr()
}

/// Irradiance, s-polarized, transmitted, defined immediately after the interface.
///
/// **Context**: The transmitted power fraction depends on the normal component
/// of the real power flux in the substrate, not only on the field amplitude.
/// Inside an absorbing medium the wave is inhomogeneous and the flux carries
/// the complex cosine of the transmission angle.
///
/// **How it Works**: Scales `|ts|^2` by `Re(n_sub cos(theta_sub)) / (n_inc cos(theta_inc))`
/// where `theta_sub` comes from [`snell_angle`].
pub fn transmittance_s(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> f64 {
    let n_sub = n_sub.into();
    fresnel::ts(n_inc, n_sub, theta_inc).norm_sqr() * flux_scale_s(n_inc, n_sub, theta_inc)
}

/// Irradiance, p-polarized, transmitted, defined immediately after the interface.
///
/// The flux weighting differs from [`transmittance_s`]: the magnetic field of a
/// p wave picks up the conjugate substrate index, so the numerator becomes
/// `Re(n_sub) Re(cos(theta_sub)) + Im(n_sub) Im(cos(theta_sub))`.
pub fn transmittance_p(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> f64 {
    let n_sub = n_sub.into();
    fresnel::tp(n_inc, n_sub, theta_inc).norm_sqr() * flux_scale_p(n_inc, n_sub, theta_inc)
}

/// Reflected and transmitted irradiance for both polarizations.
///
/// **Context**: Checking conservation at an interface requires all four
/// irradiances from the same inputs. Reporting them together also makes the
/// residuals available for diagnostics.
///
/// **How it Works**: Computes the amplitudes once via [`Amplitudes::new`] and
/// applies the same flux weightings as the free functions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Powers {
    pub rs: f64, // reflected, s
    pub rp: f64, // reflected, p
    pub ts: f64, // transmitted, s
    pub tp: f64, // transmitted, p
}

impl Powers {
    pub fn new(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> Self {
        let n_sub = n_sub.into();
        Self::from_amplitudes(&Amplitudes::new(n_inc, n_sub, theta_inc), n_inc, n_sub, theta_inc)
    }

    /// Builds the irradiances from amplitudes already computed for the same inputs.
    pub fn from_amplitudes(
        ampl: &Amplitudes,
        n_inc: f64,
        n_sub: Complex64,
        theta_inc: f64,
    ) -> Self {
        Self {
            rs: ampl.rs.norm_sqr(),
            rp: ampl.rp.norm_sqr(),
            ts: ampl.ts.norm_sqr() * flux_scale_s(n_inc, n_sub, theta_inc),
            tp: ampl.tp.norm_sqr() * flux_scale_p(n_inc, n_sub, theta_inc),
        }
    }

    /// Power missing from the s-polarized budget, `1 - Rs - Ts`.
    pub fn missing_s(&self) -> f64 {
        1.0 - (self.rs + self.ts)
    }

    /// Power missing from the p-polarized budget, `1 - Rp - Tp`.
    pub fn missing_p(&self) -> f64 {
        1.0 - (self.rp + self.tp)
    }
}

impl fmt::Display for Powers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Irradiance:")?;
        writeln!(f, "  Rs:               {:.6}", self.rs)?;
        writeln!(f, "  Rp:               {:.6}", self.rp)?;
        writeln!(f, "  Ts:               {:.6}", self.ts)?;
        writeln!(f, "  Tp:               {:.6}", self.tp)?;
        writeln!(f, "  Missing (s):      {:.3e}", self.missing_s())?;
        writeln!(f, "  Missing (p):      {:.3e}", self.missing_p())
    }
}
