use super::format::Precision;
use super::minifloat::Minifloat;
use num_complex::Complex64;

/// A complex value whose parts share one precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComplexMinifloat {
    pub re: Minifloat,
    pub im: Minifloat,
}

impl ComplexMinifloat {
    /// Builds a complex value. The imaginary part is converted to the real part's precision.
    pub fn new(re: Minifloat, im: Minifloat) -> Self {
        Self {
            re,
            im: im.convert(re.precision()),
        }
    }

    #[inline]
    pub const fn zero(precision: Precision) -> Self {
        Self {
            re: Minifloat::zero(precision),
            im: Minifloat::zero(precision),
        }
    }

    #[inline]
    pub fn precision(self) -> Precision {
        self.re.precision()
    }

    /// Returns the complex conjugate (a - bi). A zero imaginary part stays `+0`.
    #[inline]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: self.im.negate(),
        }
    }

    /// Packs both parts into one word: `re << width | im`.
    /// An F4 pair occupies the low 8 bits, an F8 pair all 16.
    #[inline]
    pub fn pack(self) -> u16 {
        let width = self.precision().width();
        ((self.re.to_bits() as u16) << width) | self.im.to_bits() as u16
    }

    #[inline]
    pub fn unpack(precision: Precision, word: u16) -> Self {
        let width = precision.width();
        let mask = (1u16 << width) - 1;
        Self {
            re: Minifloat::from_bits(precision, ((word >> width) & mask) as u8),
            im: Minifloat::from_bits(precision, (word & mask) as u8),
        }
    }

    pub fn from_complex64(precision: Precision, value: Complex64) -> Self {
        Self {
            re: Minifloat::from_f64(precision, value.re),
            im: Minifloat::from_f64(precision, value.im),
        }
    }

    pub fn to_complex64(self) -> Complex64 {
        Complex64::new(self.re.to_f64(), self.im.to_f64())
    }
}

use crate::minifloat::complex::{complex_add_sub, complex_multiply};
use core::ops::{Add, Mul, Sub};

// Addition: result in the left operand's precision
impl Add for ComplexMinifloat {
    type Output = ComplexMinifloat;

    #[inline]
    fn add(self, rhs: ComplexMinifloat) -> Self::Output {
        complex_add_sub(self, rhs, false)
    }
}

impl Sub for ComplexMinifloat {
    type Output = ComplexMinifloat;

    #[inline]
    fn sub(self, rhs: ComplexMinifloat) -> Self::Output {
        complex_add_sub(self, rhs, true)
    }
}

impl Mul for ComplexMinifloat {
    type Output = ComplexMinifloat;

    #[inline]
    fn mul(self, rhs: ComplexMinifloat) -> Self::Output {
        complex_multiply(self, rhs)
    }
}
