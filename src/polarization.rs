//! Polarization metrics derived from the s/p coefficient pairs.

use num_complex::Complex64;


/// Diattenuation of a matched irradiance pair, `|i1 - i2| / (i1 + i2)`.
///
/// Both irradiances should describe the same direction (both reflected or
/// both transmitted). The result lies in `[0, 1]` for non-negative inputs and
/// is `NaN` when both are zero.
pub fn diattenuation(irrad1: f64, irrad2: f64) -> f64 {
    (irrad1 - irrad2).abs() / (irrad1 + irrad2)
}

/// Retardance between two complex field amplitudes [radians].
///
/// The difference of the principal phases of `field1` and `field2`. It is not
/// reduced modulo `2 pi`, so values anywhere in `(-2 pi, 2 pi)` can appear.
pub fn retardance(field1: Complex64, field2: Complex64) -> f64 {
    field1.arg() - field2.arg()
}
