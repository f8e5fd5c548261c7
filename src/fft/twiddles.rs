// src/fft/twiddles.rs

use crate::common::MAX_N;
use crate::minifloat::{ComplexMinifloat, Minifloat, Precision};
use core::f64::consts::PI;
use num_complex::Complex64;

/// Number of stored base angles: `0..=MAX_N/2`.
pub const TWIDDLE_ENTRIES: usize = MAX_N / 2 + 1;

const HALF: usize = MAX_N / 2;

/// Roots of unity `W^k = e^(-2πik/MAX_N)` for the first half turn, in both formats.
///
/// The second half turn is derived from `W^(MAX_N-k) = conj(W^k)`. Entries are quantized
/// with [`Minifloat::from_f64`], so each one is a value the arithmetic units could produce.
#[derive(Clone)]
pub struct TwiddleTable {
    f4: [ComplexMinifloat; TWIDDLE_ENTRIES],
    f8: [ComplexMinifloat; TWIDDLE_ENTRIES],
}

impl TwiddleTable {
    pub fn new() -> Self {
        let mut table = Self {
            f4: [ComplexMinifloat::zero(Precision::F4); TWIDDLE_ENTRIES],
            f8: [ComplexMinifloat::zero(Precision::F8); TWIDDLE_ENTRIES],
        };
        precompute_twiddles(&mut table.f4, Precision::F4);
        precompute_twiddles(&mut table.f8, Precision::F8);
        table
    }

    /// Stored entry for base angle `index` (`0..=MAX_N/2`). Panics if out of range.
    #[inline]
    pub fn entry(&self, index: usize, precision: Precision) -> ComplexMinifloat {
        match precision {
            Precision::F4 => self.f4[index],
            Precision::F8 => self.f8[index],
        }
    }

    /// Twiddle factor `W_n^k` in `precision`. `n` must be a power of two in `[2, MAX_N]`;
    /// `k` is taken modulo `n`.
    pub fn lookup(&self, k: usize, n: usize, precision: Precision) -> ComplexMinifloat {
        debug_assert!(n >= 2 && n <= MAX_N && n.is_power_of_two());
        let scaled = (k % n) * (MAX_N / n);

        if scaled == HALF {
            let minus_one = Minifloat::one(precision).negate();
            return ComplexMinifloat {
                re: minus_one,
                im: Minifloat::zero(precision),
            };
        }
        if scaled > HALF {
            return self.entry(MAX_N - scaled, precision).conj();
        }
        self.entry(scaled, precision)
    }
}

impl Default for TwiddleTable {
    fn default() -> Self {
        Self::new()
    }
}

fn precompute_twiddles(twiddles: &mut [ComplexMinifloat], precision: Precision) {
    for (k, w) in twiddles.iter_mut().enumerate() {
        let angle = -2.0 * PI * (k as f64) / (MAX_N as f64);
        let value = Complex64::new(libm::cos(angle), libm::sin(angle));
        *w = ComplexMinifloat::from_complex64(precision, value);
    }
}

#[cfg(test)]
#[path = "twiddles_tests.rs"]
mod tests;
