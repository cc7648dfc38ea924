//! Array evaluation over many incidence angles.
//!
//! Plotting and fitting consumers call the calculator with an array of angles
//! rather than a scalar. Every element is independent, so the parallel
//! variants simply spread the scalar calls over the rayon pool. Results are
//! identical to elementwise scalar calls, in the same order.

use ndarray::Array1;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::params::Interface;


/// Maps `f` over `angles` on the calling thread.
pub fn evaluate<F>(angles: &Array1<f64>, f: F) -> Array1<f64>
where
    F: Fn(f64) -> f64,
{
    angles.mapv(f)
}

/// Maps `f` over `angles` on the rayon pool.
pub fn par_evaluate<F>(angles: &Array1<f64>, f: F) -> Array1<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    let values: Vec<f64> = angles.to_vec().into_par_iter().map(f).collect();
    Array1::from(values)
}

/// Evaluates any `(n_inc, n_sub, theta_inc)` function of the calculator over
/// `angles` for a fixed interface, in parallel.
///
/// Works with both real outputs such as
/// [`transmittance_s`](crate::powers::transmittance_s) and complex amplitudes
/// such as [`rs`](crate::fresnel::rs).
pub fn over_angles<F, T>(interface: &Interface, angles: &Array1<f64>, f: F) -> Array1<T>
where
    F: Fn(f64, Complex64, f64) -> T + Sync + Send,
    T: Send,
{
    let Interface { n_inc, n_sub } = *interface;
    let values: Vec<T> = angles
        .to_vec()
        .into_par_iter()
        .map(|theta| f(n_inc, n_sub, theta))
        .collect();
    Array1::from(values)
}
