// src/metrics.rs

//! Accuracy figures for comparing a minifloat transform against an exact one.

use crate::common::FftError;
use crate::minifloat::ComplexMinifloat;
use core::f64::consts::PI;
use num_complex::Complex64;

/// Exact DFT of `input` into `output`: `X[k] = Σ x[j]·e^(-2πijk/N)`.
pub fn reference_dft(input: &[Complex64], output: &mut [Complex64]) -> Result<(), FftError> {
    if input.len() != output.len() {
        return Err(FftError::SizeMismatch);
    }
    let n = input.len();
    for (k, out) in output.iter_mut().enumerate() {
        let mut acc = Complex64::new(0.0, 0.0);
        for (j, &x) in input.iter().enumerate() {
            // Reduce j·k mod N first to keep the angle small.
            let angle = -2.0 * PI * (((j * k) % n) as f64) / (n as f64);
            acc += x * Complex64::new(libm::cos(angle), libm::sin(angle));
        }
        *out = acc;
    }
    Ok(())
}

/// Signal-to-quantization-noise ratio in dB: `10·log10(Σ|golden|² / Σ|golden − approx|²)`.
/// Infinite when the two agree exactly.
pub fn sqnr_db(golden: &[Complex64], approx: &[ComplexMinifloat]) -> Result<f64, FftError> {
    if golden.len() != approx.len() {
        return Err(FftError::SizeMismatch);
    }
    let mut signal = 0.0;
    let mut noise = 0.0;
    for (g, a) in golden.iter().zip(approx) {
        signal += g.norm_sqr();
        noise += (g - a.to_complex64()).norm_sqr();
    }
    if noise == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * libm::log10(signal / noise))
}

/// Mean of `|golden[i] − approx[i]|`. Zero for empty inputs.
pub fn mean_abs_error(golden: &[Complex64], approx: &[ComplexMinifloat]) -> Result<f64, FftError> {
    if golden.len() != approx.len() {
        return Err(FftError::SizeMismatch);
    }
    if golden.is_empty() {
        return Ok(0.0);
    }
    let total: f64 = golden
        .iter()
        .zip(approx)
        .map(|(g, a)| libm::sqrt((g - a.to_complex64()).norm_sqr()))
        .sum();
    Ok(total / golden.len() as f64)
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
