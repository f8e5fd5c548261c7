// src/minifloat/arith.rs

use super::types::{E2M1, E4M3, Layout, Minifloat, Precision};

/// Extra low-order bits carried through alignment in `add_sub`. Wider than any shift
/// inside the alignment window, so an aligned operand never loses bits.
const GUARD_BITS: u32 = 16;

/// Dispatches a layout-generic routine on a runtime [`Precision`].
macro_rules! with_layout {
    ($precision:expr, $f:ident ( $($arg:expr),* $(,)? )) => {
        match $precision {
            Precision::F4 => $f::<E2M1>($($arg),*),
            Precision::F8 => $f::<E4M3>($($arg),*),
        }
    };
}

pub(crate) use with_layout;

// --- Raw field access ---

#[inline]
pub(crate) fn is_negative<L: Layout>(bits: u8) -> bool {
    bits & L::SIGN_MASK != 0
}

#[inline]
pub(crate) fn exponent<L: Layout>(bits: u8) -> u32 {
    ((bits as u32) >> L::MAN_BITS) & L::EXP_ALL_ONES
}

#[inline]
pub(crate) fn mantissa<L: Layout>(bits: u8) -> u32 {
    (bits as u32) & L::MAN_MASK
}

#[inline]
pub(crate) fn magnitude<L: Layout>(bits: u8) -> u8 {
    bits & (L::SIGN_MASK - 1)
}

#[inline]
pub(crate) fn is_zero<L: Layout>(bits: u8) -> bool {
    magnitude::<L>(bits) == 0
}

#[inline]
pub(crate) fn is_infinite<L: Layout>(bits: u8) -> bool {
    L::HAS_INFINITY && exponent::<L>(bits) == L::EXP_ALL_ONES
}

/// Significand with the hidden bit attached (hidden bit is 0 for subnormals).
#[inline]
fn significand<L: Layout>(bits: u8) -> u32 {
    let hidden = (exponent::<L>(bits) != 0) as u32;
    (hidden << L::MAN_BITS) | mantissa::<L>(bits)
}

/// Significand width including the hidden bit.
#[inline]
const fn significand_width<L: Layout>() -> u32 {
    L::MAN_BITS + 1
}

/// Exponent used for alignment. Subnormals sit at the minimum normal exponent.
#[inline]
fn effective_exponent<L: Layout>(bits: u8) -> i32 {
    exponent::<L>(bits).max(1) as i32
}

/// Power of two such that `value = significand * 2^scale`.
#[inline]
fn scale<L: Layout>(bits: u8) -> i32 {
    effective_exponent::<L>(bits) - L::BIAS - L::MAN_BITS as i32
}

#[inline]
pub(crate) fn pack<L: Layout>(negative: bool, exponent: u32, mantissa: u32) -> u8 {
    let sign = if negative { L::SIGN_MASK } else { 0 };
    sign | ((exponent << L::MAN_BITS) as u8) | (mantissa & L::MAN_MASK) as u8
}

/// Overflow sentinel: signed infinity for F8, signed maximum finite magnitude for F4.
#[inline]
pub(crate) fn overflow<L: Layout>(negative: bool) -> u8 {
    if L::HAS_INFINITY {
        pack::<L>(negative, L::EXP_ALL_ONES, 0)
    } else {
        pack::<L>(negative, L::MAX_FINITE_EXP, L::MAN_MASK)
    }
}

/// Shifts `sig` right by `shift`, rounding up when the discarded bits are at least half
/// a unit in the last place. Negative shifts are exact left shifts.
#[inline]
fn round_shift(sig: u64, shift: i32) -> u64 {
    if shift <= 0 {
        return sig << (-shift) as u32;
    }
    if shift > 64 {
        return 0;
    }
    let wide = sig as u128;
    let kept = wide >> shift;
    let discarded = wide & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);
    (if discarded >= half { kept + 1 } else { kept }) as u64
}

/// Normalizes and rounds the exact value `(-1)^negative * sig * 2^scale` into layout `L`.
///
/// This is the single rounding policy of the crate. Results below the normal range
/// become subnormals (and zero once they round below the smallest one), results past
/// the largest finite exponent become the overflow sentinel, and an exact zero is
/// always `+0`.
pub(crate) fn round_pack<L: Layout>(negative: bool, sig: u64, scale: i32) -> u8 {
    if sig == 0 {
        return 0;
    }

    let msb = 63 - sig.leading_zeros() as i32;
    let mut biased = msb + scale + L::BIAS;

    let min_scale = 1 - L::BIAS - L::MAN_BITS as i32;
    let shift = if biased >= 1 {
        msb - L::MAN_BITS as i32
    } else {
        min_scale - scale
    };
    let mut q = round_shift(sig, shift);

    if biased < 1 {
        if q == 0 {
            return 0;
        }
        // Rounding may carry a subnormal into the smallest normal.
        biased = (q >> L::MAN_BITS != 0) as i32;
    } else if q >> (L::MAN_BITS + 1) != 0 {
        q >>= 1;
        biased += 1;
    }

    if biased > L::MAX_FINITE_EXP as i32 {
        return overflow::<L>(negative);
    }
    pack::<L>(negative, biased as u32, q as u32)
}

pub(crate) fn mul_bits<L: Layout>(a: u8, b: u8) -> u8 {
    if is_zero::<L>(a) || is_zero::<L>(b) {
        return 0;
    }

    let negative = is_negative::<L>(a) ^ is_negative::<L>(b);
    if is_infinite::<L>(a) || is_infinite::<L>(b) {
        return overflow::<L>(negative);
    }

    let product = significand::<L>(a) as u64 * significand::<L>(b) as u64;
    let exp2 = scale::<L>(a) + scale::<L>(b);

    // A product whose normalized exponent field would be negative flushes to zero.
    let msb = 63 - product.leading_zeros() as i32;
    if msb + exp2 + L::BIAS < 0 {
        return 0;
    }

    round_pack::<L>(negative, product, exp2)
}

pub(crate) fn add_sub_bits<L: Layout>(a: u8, b: u8, subtract: bool) -> u8 {
    let neg_a = is_negative::<L>(a);
    let neg_b = is_negative::<L>(b) ^ subtract;

    match (is_infinite::<L>(a), is_infinite::<L>(b)) {
        (true, true) if neg_a != neg_b => return 0,
        (true, _) => return overflow::<L>(neg_a),
        (_, true) => return overflow::<L>(neg_b),
        _ => {}
    }

    // (exponent, mantissa) ordering is the ordering of the magnitude bits.
    let (big, neg_big, small, neg_small) = if magnitude::<L>(a) >= magnitude::<L>(b) {
        (a, neg_a, b, neg_b)
    } else {
        (b, neg_b, a, neg_a)
    };

    // An operand shifted past the significand width contributes nothing.
    let shift = (effective_exponent::<L>(big) - effective_exponent::<L>(small)) as u32;
    let big_sig = (significand::<L>(big) as u64) << GUARD_BITS;
    let small_sig = if shift > significand_width::<L>() {
        0
    } else {
        ((significand::<L>(small) as u64) << GUARD_BITS) >> shift
    };

    let sum = if neg_big == neg_small {
        big_sig + small_sig
    } else {
        big_sig - small_sig
    };

    round_pack::<L>(neg_big, sum, scale::<L>(big) - GUARD_BITS as i32)
}

/// Quantizes an `f64` with the same rounding policy as the arithmetic units.
pub(crate) fn encode_f64<L: Layout>(value: f64) -> u8 {
    if value.is_nan() || value == 0.0 {
        return 0;
    }
    let negative = value.is_sign_negative();
    if value.is_infinite() {
        return overflow::<L>(negative);
    }

    let bits = value.to_bits();
    let exp_field = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (sig, scale) = if exp_field == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_field - 1075)
    };

    round_pack::<L>(negative, sig, scale)
}

pub(crate) fn decode_f64<L: Layout>(bits: u8) -> f64 {
    let negative = is_negative::<L>(bits);
    let magnitude = if is_zero::<L>(bits) {
        0.0
    } else if is_infinite::<L>(bits) {
        f64::INFINITY
    } else {
        libm::ldexp(significand::<L>(bits) as f64, scale::<L>(bits))
    };
    if negative { -magnitude } else { magnitude }
}

/// Re-rounds an encoding of layout `Src` into layout `Dst`. The precision converter uses
/// it for the in-range part of a narrowing conversion.
pub(crate) fn reround<Src: Layout, Dst: Layout>(bits: u8) -> u8 {
    round_pack::<Dst>(
        is_negative::<Src>(bits),
        significand::<Src>(bits) as u64,
        scale::<Src>(bits),
    )
}

/// Scalar multiply. The result takes `a`'s precision; `b` is converted first if needed.
pub fn multiply(a: Minifloat, b: Minifloat) -> Minifloat {
    let precision = a.precision();
    let b = b.convert(precision);
    let bits = with_layout!(precision, mul_bits(a.to_bits(), b.to_bits()));
    Minifloat::from_bits(precision, bits)
}

/// Scalar add (`subtract == false`) or subtract. The result takes `a`'s precision.
pub fn add_sub(a: Minifloat, b: Minifloat, subtract: bool) -> Minifloat {
    let precision = a.precision();
    let b = b.convert(precision);
    let bits = with_layout!(precision, add_sub_bits(a.to_bits(), b.to_bits(), subtract));
    Minifloat::from_bits(precision, bits)
}

#[cfg(test)]
#[path = "arith_tests.rs"]
mod tests;
