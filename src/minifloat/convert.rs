// src/minifloat/convert.rs

use super::arith::reround;
use super::types::{ComplexMinifloat, E2M1, E4M3, Minifloat, Precision};

/// Difference between the F8 and F4 exponent biases.
const BIAS_DELTA: u8 = (Precision::F8.bias() - Precision::F4.bias()) as u8;

/// Largest F4 exponent field.
const NARROW_MAX_EXP: u8 = (1 << Precision::F4.exponent_bits()) - 1;

/// F8 exponent field of the F4 subnormal's value, `2^(1 - bias - mantissa_bits)` = 0.5.
const WIDE_SUBNORMAL_EXP: u8 = (1 - Precision::F4.bias() - Precision::F4.mantissa_bits() as i32
    + Precision::F8.bias()) as u8;

/// Widens an F4 value to F8. Exact: every F4 value is representable in F8.
/// F8 inputs are returned unchanged.
pub fn to_wider(x: Minifloat) -> Minifloat {
    if x.precision() == Precision::F8 {
        return x;
    }
    if x.is_zero() {
        return Minifloat::zero(Precision::F8);
    }

    let negative = x.is_negative();
    if x.is_subnormal() {
        return Minifloat::from_parts(Precision::F8, negative, WIDE_SUBNORMAL_EXP, 0);
    }

    let shift = Precision::F8.mantissa_bits() - Precision::F4.mantissa_bits();
    Minifloat::from_parts(
        Precision::F8,
        negative,
        x.exponent() + BIAS_DELTA,
        x.mantissa() << shift,
    )
}

/// Narrows an F8 value to F4. Lossy:
/// - zeros, F8 subnormals and exponents below the F4 range flush to `+0`;
/// - exponents above the F4 range (including ±∞) saturate to ±6;
/// - everything else is re-rounded to one mantissa bit with the arithmetic units'
///   round-half-up rule, which may carry into saturation.
///
/// F4 inputs are returned unchanged.
pub fn to_narrower(x: Minifloat) -> Minifloat {
    if x.precision() == Precision::F4 {
        return x;
    }
    if x.is_zero() || x.is_subnormal() {
        return Minifloat::zero(Precision::F4);
    }

    let exponent = x.exponent();
    if exponent < BIAS_DELTA {
        return Minifloat::zero(Precision::F4);
    }
    if exponent > BIAS_DELTA + NARROW_MAX_EXP {
        return Minifloat::max_finite(Precision::F4, x.is_negative());
    }

    Minifloat::from_bits(Precision::F4, reround::<E4M3, E2M1>(x.to_bits()))
}

/// Converts a complex value part by part.
pub fn complex_convert(x: ComplexMinifloat, precision: Precision) -> ComplexMinifloat {
    ComplexMinifloat {
        re: x.re.convert(precision),
        im: x.im.convert(precision),
    }
}

impl Minifloat {
    /// Converts to `precision`, widening exactly or narrowing with rounding.
    #[inline]
    pub fn convert(self, precision: Precision) -> Minifloat {
        match precision {
            Precision::F8 => to_wider(self),
            Precision::F4 => to_narrower(self),
        }
    }
}

impl ComplexMinifloat {
    #[inline]
    pub fn convert(self, precision: Precision) -> ComplexMinifloat {
        if self.precision() == precision {
            return self;
        }
        complex_convert(self, precision)
    }
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
