// src/minifloat/types/format.rs

use core::fmt;

/// The two minifloat formats the datapath understands.
///
/// - `F4`: E2M1, 1 sign + 2 exponent + 1 mantissa bits, bias 1, saturates at ±6.
/// - `F8`: E4M3, 1 sign + 4 exponent + 3 mantissa bits, bias 7, overflows to ±∞.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precision {
    F4,
    F8,
}

impl Precision {
    /// Total encoding width in bits.
    #[inline]
    pub const fn width(self) -> u32 {
        1 + self.exponent_bits() + self.mantissa_bits()
    }

    #[inline]
    pub const fn exponent_bits(self) -> u32 {
        match self {
            Precision::F4 => 2,
            Precision::F8 => 4,
        }
    }

    #[inline]
    pub const fn mantissa_bits(self) -> u32 {
        match self {
            Precision::F4 => 1,
            Precision::F8 => 3,
        }
    }

    #[inline]
    pub const fn bias(self) -> i32 {
        match self {
            Precision::F4 => 1,
            Precision::F8 => 7,
        }
    }

    /// F8 reserves the all-ones exponent for infinity; F4 has no such encoding.
    #[inline]
    pub const fn has_infinity(self) -> bool {
        matches!(self, Precision::F8)
    }

    /// Decodes a precision flag: `0` selects F4, anything else selects F8.
    #[inline]
    pub const fn from_flag(flag: u8) -> Self {
        if flag == 0 { Precision::F4 } else { Precision::F8 }
    }

    #[inline]
    pub const fn flag(self) -> u8 {
        match self {
            Precision::F4 => 0,
            Precision::F8 => 1,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::F4 => write!(f, "FP4"),
            Precision::F8 => write!(f, "FP8"),
        }
    }
}

/// Compile-time description of a minifloat bit layout.
///
/// The arithmetic routines are written once against this trait and instantiated for
/// [`E2M1`] and [`E4M3`], so both formats share the exact same rounding code.
pub trait Layout {
    const PRECISION: Precision;

    const EXP_BITS: u32 = Self::PRECISION.exponent_bits();
    const MAN_BITS: u32 = Self::PRECISION.mantissa_bits();
    const BIAS: i32 = Self::PRECISION.bias();
    const HAS_INFINITY: bool = Self::PRECISION.has_infinity();

    const SIGN_MASK: u8 = 1 << (Self::EXP_BITS + Self::MAN_BITS);
    const MAN_MASK: u32 = (1 << Self::MAN_BITS) - 1;
    const EXP_ALL_ONES: u32 = (1 << Self::EXP_BITS) - 1;
    /// Largest exponent field that still encodes a finite value.
    const MAX_FINITE_EXP: u32 = if Self::HAS_INFINITY {
        Self::EXP_ALL_ONES - 1
    } else {
        Self::EXP_ALL_ONES
    };
}

/// 4-bit layout.
pub enum E2M1 {}

/// 8-bit layout.
pub enum E4M3 {}

impl Layout for E2M1 {
    const PRECISION: Precision = Precision::F4;
}

impl Layout for E4M3 {
    const PRECISION: Precision = Precision::F8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_constants() {
        assert_eq!(E2M1::SIGN_MASK, 0x8);
        assert_eq!(E2M1::MAX_FINITE_EXP, 3);
        assert_eq!(E4M3::SIGN_MASK, 0x80);
        assert_eq!(E4M3::MAX_FINITE_EXP, 14);
        assert_eq!(E4M3::MAN_MASK, 0x7);
    }

    #[test]
    fn test_widths() {
        assert_eq!(Precision::F4.width(), 4);
        assert_eq!(Precision::F8.width(), 8);
    }

    #[test]
    fn test_flags() {
        assert_eq!(Precision::from_flag(0), Precision::F4);
        assert_eq!(Precision::from_flag(1), Precision::F8);
        assert_eq!(Precision::from_flag(7), Precision::F8);
        assert_eq!(Precision::from_flag(Precision::F8.flag()), Precision::F8);
    }
}
