//! Snell's law over complex refractive indices.
//!
//! This module maps a real incidence angle onto the (generally complex)
//! transmission angle inside the substrate. The transmission angle is complex
//! whenever the substrate absorbs, or when the incidence angle lies beyond the
//! critical angle of a high-to-low index step. Downstream code only ever
//! consumes the cosine of this angle, so the evanescent branch is carried
//! through the algebra rather than being clamped.
//!
//! # Branch convention
//!
//! The arcsine is the principal branch provided by [`num_complex`]: it agrees
//! with the real `asin` for real arguments in `[-1, 1]` and is the analytic
//! continuation elsewhere.

use num_complex::Complex64;


/// Computes the transmitted (substrate) angle from Snell's law.
///
/// **Context**: For a lossless substrate below the critical angle this is the
/// familiar real refraction angle. Absorbing substrates and total internal
/// reflection both push the angle off the real axis, and the transmitted
/// irradiance needs that complex value to weight the flux correctly.
///
/// **How it Works**: Evaluates `asin(n_inc * sin(theta_inc) / n_sub)` in
/// complex arithmetic. No input is rejected; out-of-contract arguments give
/// whatever the arithmetic produces, possibly `NaN`.
///
/// # Example
/// ```rust
/// use fresnel::snell_angle;
/// let theta_t = snell_angle(1.0, 1.5, 0.5);
/// assert!(theta_t.im.abs() < 1e-12);
/// ```
pub fn snell_angle(n_inc: f64, n_sub: impl Into<Complex64>, theta_inc: f64) -> Complex64 {
    let n_sub = n_sub.into();
    (n_inc * theta_inc.sin() / n_sub).asin()
}
