//! Closed-form Fresnel calculator for a planar interface.
//!
//! Given a real incident index, a possibly absorbing substrate index and an
//! incidence angle in radians, this crate computes the Fresnel amplitude
//! coefficients, the irradiance coefficients with energy-conserving flux
//! weighting, and the diattenuation and retardance of the s/p pair.
//!
//! Every function is pure. Out-of-contract inputs are not rejected; they
//! propagate through the arithmetic as `NaN`/`Inf`. Use
//! [`Interface::check`] when explicit validation is wanted.
//!
//! ```rust
//! use fresnel::{diattenuation, reflectance_p, reflectance_s, rs};
//!
//! let r = rs(1.0, 1.5, 0.0);
//! assert!((r.re + 0.2).abs() < 1e-12);
//! let d = diattenuation(reflectance_s(1.0, 1.5, 0.8), reflectance_p(1.0, 1.5, 0.8));
//! assert!((0.0..=1.0).contains(&d));
//! ```

pub mod batch;
pub mod error;
pub mod fresnel;
pub mod output;
pub mod params;
pub mod polarization;
pub mod powers;
pub mod settings;
pub mod snell;
pub mod sweep;
pub mod timing;
pub mod validation;

pub use error::ContractError;
pub use fresnel::{rp, rs, tp, ts, Amplitudes};
pub use params::Interface;
pub use polarization::{diattenuation, retardance};
pub use powers::{reflectance_p, reflectance_s, transmittance_p, transmittance_s, Powers};
pub use snell::snell_angle;

pub use num_complex::Complex64;
