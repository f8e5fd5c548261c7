// src/minifloat/types/minifloat.rs

use super::format::{E2M1, E4M3, Precision};
use crate::minifloat::arith::{
    self, decode_f64, encode_f64, exponent, is_infinite, is_negative, is_zero, mantissa,
    overflow, with_layout,
};

/// A scalar minifloat: a precision tag plus its encoding in the low `width()` bits.
///
/// There is no NaN. F8 keeps the all-ones exponent for ±∞ (produced only by overflow),
/// F4 saturates at ±6. Zero results are always produced as `+0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Minifloat {
    precision: Precision,
    bits: u8,
}

impl Minifloat {
    /// Creates a Minifloat from its raw encoding. Bits above the format width are dropped.
    #[inline]
    pub const fn from_bits(precision: Precision, bits: u8) -> Self {
        let mask = ((1u16 << precision.width()) - 1) as u8;
        Self {
            precision,
            bits: bits & mask,
        }
    }

    /// Assembles a value from its fields. Fields wider than the format are truncated.
    pub const fn from_parts(precision: Precision, negative: bool, exponent: u8, mantissa: u8) -> Self {
        let man_bits = precision.mantissa_bits();
        let exp_mask = ((1u16 << precision.exponent_bits()) - 1) as u8;
        let man_mask = ((1u16 << man_bits) - 1) as u8;
        let sign = if negative { 1u8 << (precision.width() - 1) } else { 0 };
        Self::from_bits(
            precision,
            sign | ((exponent & exp_mask) << man_bits) | (mantissa & man_mask),
        )
    }

    #[inline]
    pub const fn zero(precision: Precision) -> Self {
        Self { precision, bits: 0 }
    }

    /// 1.0 in the given precision.
    #[inline]
    pub const fn one(precision: Precision) -> Self {
        Self::from_parts(precision, false, precision.bias() as u8, 0)
    }

    /// Largest finite magnitude: 6.0 for F4, 240.0 for F8.
    pub const fn max_finite(precision: Precision, negative: bool) -> Self {
        let all_ones = ((1u16 << precision.exponent_bits()) - 1) as u8;
        let exponent = if precision.has_infinity() { all_ones - 1 } else { all_ones };
        let mantissa = ((1u16 << precision.mantissa_bits()) - 1) as u8;
        Self::from_parts(precision, negative, exponent, mantissa)
    }

    /// The overflow sentinel of the format: ±∞ for F8, ±max for F4.
    pub fn overflow(precision: Precision, negative: bool) -> Self {
        let bits = with_layout!(precision, overflow(negative));
        Self::from_bits(precision, bits)
    }

    /// Quantizes an f64 using the arithmetic units' rounding policy.
    pub fn from_f64(precision: Precision, value: f64) -> Self {
        let bits = with_layout!(precision, encode_f64(value));
        Self::from_bits(precision, bits)
    }

    pub fn to_f64(self) -> f64 {
        with_layout!(self.precision, decode_f64(self.bits))
    }

    #[inline]
    pub const fn precision(self) -> Precision {
        self.precision
    }

    /// Returns the stored raw encoding.
    #[inline]
    pub const fn to_bits(self) -> u8 {
        self.bits
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        with_layout!(self.precision, is_negative(self.bits))
    }

    #[inline]
    pub fn exponent(self) -> u8 {
        with_layout!(self.precision, exponent(self.bits)) as u8
    }

    #[inline]
    pub fn mantissa(self) -> u8 {
        with_layout!(self.precision, mantissa(self.bits)) as u8
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        with_layout!(self.precision, is_zero(self.bits))
    }

    #[inline]
    pub fn is_subnormal(self) -> bool {
        self.exponent() == 0 && self.mantissa() != 0
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        with_layout!(self.precision, is_infinite(self.bits))
    }

    /// Flips the sign. Zero stays `+0`.
    #[inline]
    pub fn negate(self) -> Self {
        if self.is_zero() {
            return Self::zero(self.precision);
        }
        let sign = 1u8 << (self.precision.width() - 1);
        Self::from_bits(self.precision, self.bits ^ sign)
    }
}

impl Default for Minifloat {
    fn default() -> Self {
        Self::zero(Precision::F8)
    }
}

use core::ops::{Add, Mul, Neg, Sub};

// Binary operators keep the left operand's precision; the right operand is converted.

impl Add for Minifloat {
    type Output = Minifloat;

    #[inline]
    fn add(self, rhs: Minifloat) -> Self::Output {
        arith::add_sub(self, rhs, false)
    }
}

impl Sub for Minifloat {
    type Output = Minifloat;

    #[inline]
    fn sub(self, rhs: Minifloat) -> Self::Output {
        arith::add_sub(self, rhs, true)
    }
}

impl Mul for Minifloat {
    type Output = Minifloat;

    #[inline]
    fn mul(self, rhs: Minifloat) -> Self::Output {
        arith::multiply(self, rhs)
    }
}

impl Neg for Minifloat {
    type Output = Minifloat;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

use core::fmt;

impl fmt::Display for Minifloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.to_f64())
    }
}

impl fmt::Debug for Minifloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show the decoded value and the raw encoding, padded to the format width.
        match self.precision {
            Precision::F4 => write!(f, "{:.6} (FP4 {:04b})", self.to_f64(), self.bits),
            Precision::F8 => write!(f, "{:.6} (FP8 {:08b})", self.to_f64(), self.bits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;

    #[test]
    fn test_from_parts() {
        let v = Minifloat::from_parts(Precision::F8, true, 8, 4);
        assert_eq!(v.to_bits(), 0b1100_0100);
        assert!(v.is_negative());
        assert_eq!(v.exponent(), 8);
        assert_eq!(v.mantissa(), 4);
        assert_eq!(v.to_f64(), -3.0);
    }

    #[test]
    fn test_from_bits_masks_width() {
        let v = Minifloat::from_bits(Precision::F4, 0xf3);
        assert_eq!(v.to_bits(), 0x3);
        assert_eq!(v.to_f64(), 1.5);
    }

    #[test]
    fn test_constants() {
        assert_eq!(Minifloat::one(Precision::F4).to_f64(), 1.0);
        assert_eq!(Minifloat::one(Precision::F8).to_f64(), 1.0);
        assert_eq!(Minifloat::max_finite(Precision::F4, false).to_f64(), 6.0);
        assert_eq!(Minifloat::max_finite(Precision::F8, true).to_f64(), -240.0);
        assert_eq!(Minifloat::overflow(Precision::F4, true).to_f64(), -6.0);
        assert!(Minifloat::overflow(Precision::F8, false).is_infinite());
    }

    #[test]
    fn test_subnormal_values() {
        let half = Minifloat::from_parts(Precision::F4, false, 0, 1);
        assert!(half.is_subnormal());
        assert_eq!(half.to_f64(), 0.5);

        let tiny = Minifloat::from_parts(Precision::F8, false, 0, 1);
        assert!(tiny.is_subnormal());
        assert_eq!(tiny.to_f64(), 1.0 / 512.0);
    }

    #[test]
    fn test_negate_keeps_positive_zero() {
        let z = Minifloat::zero(Precision::F8);
        assert_eq!((-z).to_bits(), 0);
        let one = Minifloat::one(Precision::F8);
        assert_eq!((-one).to_f64(), -1.0);
    }

    #[test]
    fn test_operators() {
        let a = Minifloat::from_f64(Precision::F8, 1.5);
        let b = Minifloat::from_f64(Precision::F8, 2.0);
        assert_eq!((a * b).to_f64(), 3.0);
        assert_eq!((a + b).to_f64(), 3.5);
        assert_eq!((a - b).to_f64(), -0.5);
    }

    #[test]
    fn test_operators_mixed_precision() {
        // F8 + F4: the F4 operand is widened and the result stays F8.
        let a = Minifloat::from_f64(Precision::F8, 1.5);
        let b = Minifloat::from_f64(Precision::F4, 3.0);
        let sum = a + b;
        assert_eq!(sum.precision(), Precision::F8);
        assert_eq!(sum.to_f64(), 4.5);
    }

    #[test]
    fn test_debug_display() {
        let v = Minifloat::from_f64(Precision::F4, 1.5);
        assert_eq!(format!("{}", v), "1.500000");
        assert_eq!(format!("{:?}", v), "1.500000 (FP4 0011)");
    }
}
