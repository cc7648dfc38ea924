use fresnel::{self, validation, Complex64};
use pyo3::prelude::*;

/// Transmitted (substrate) angle according to Snell's law. Complex-valued. [radians]
#[pyfunction]
fn snell_angle(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> Complex64 {
    fresnel::snell_angle(n_inc, n_sub, theta_inc)
}

/// Electric field amplitude, s-polarized, reflected.
#[pyfunction]
fn rs(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> Complex64 {
    fresnel::rs(n_inc, n_sub, theta_inc)
}

/// Electric field amplitude, p-polarized, reflected.
#[pyfunction]
fn rp(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> Complex64 {
    fresnel::rp(n_inc, n_sub, theta_inc)
}

/// Electric field amplitude, s-polarized, transmitted.
#[pyfunction]
fn ts(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> Complex64 {
    fresnel::ts(n_inc, n_sub, theta_inc)
}

/// Electric field amplitude, p-polarized, transmitted.
#[pyfunction]
fn tp(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> Complex64 {
    fresnel::tp(n_inc, n_sub, theta_inc)
}

/// Irradiance, s-polarized, reflected.
#[pyfunction]
#[pyo3(name = "Rs")]
fn reflectance_s(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> f64 {
    fresnel::reflectance_s(n_inc, n_sub, theta_inc)
}

/// Irradiance, p-polarized, reflected.
#[pyfunction]
#[pyo3(name = "Rp")]
fn reflectance_p(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> f64 {
    fresnel::reflectance_p(n_inc, n_sub, theta_inc)
}

/// Irradiance, s-polarized, transmitted.
#[pyfunction]
#[pyo3(name = "Ts")]
fn transmittance_s(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> f64 {
    fresnel::transmittance_s(n_inc, n_sub, theta_inc)
}

/// Irradiance, p-polarized, transmitted.
#[pyfunction]
#[pyo3(name = "Tp")]
fn transmittance_p(n_inc: f64, n_sub: Complex64, theta_inc: f64) -> f64 {
    fresnel::transmittance_p(n_inc, n_sub, theta_inc)
}

/// Diattenuation of a matched irradiance pair.
#[pyfunction]
fn diattenuation(irrad1: f64, irrad2: f64) -> f64 {
    fresnel::diattenuation(irrad1, irrad2)
}

/// Retardance between two complex field amplitudes. [radians]
#[pyfunction]
fn retardance(field1: Complex64, field2: Complex64) -> f64 {
    fresnel::retardance(field1, field2)
}

/// Runs the validation battery and returns (scenario name, passed) pairs.
#[pyfunction]
fn run_self_test() -> Vec<(String, bool)> {
    validation::run()
        .checks
        .into_iter()
        .map(|check| (check.name.to_string(), check.passed))
        .collect()
}

/// Fresnel equations for a planar interface, implemented in Rust.
#[pymodule]
fn fresnel_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(snell_angle, m)?)?;
    m.add_function(wrap_pyfunction!(rs, m)?)?;
    m.add_function(wrap_pyfunction!(rp, m)?)?;
    m.add_function(wrap_pyfunction!(ts, m)?)?;
    m.add_function(wrap_pyfunction!(tp, m)?)?;
    m.add_function(wrap_pyfunction!(reflectance_s, m)?)?;
    m.add_function(wrap_pyfunction!(reflectance_p, m)?)?;
    m.add_function(wrap_pyfunction!(transmittance_s, m)?)?;
    m.add_function(wrap_pyfunction!(transmittance_p, m)?)?;
    m.add_function(wrap_pyfunction!(diattenuation, m)?)?;
    m.add_function(wrap_pyfunction!(retardance, m)?)?;
    m.add_function(wrap_pyfunction!(run_self_test, m)?)?;
    Ok(())
}
