// src/bitrev.rs

//! Bit-reversed ordering. The engine expects its input already permuted; these helpers
//! do that on the host side.

/// Reverses the low `bits` bits of `index`.
#[inline]
pub fn reverse_index(index: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    index.reverse_bits() >> (usize::BITS - bits)
}

/// Permutes `buffer` into bit-reversed order in place. The length must be a power of two.
pub fn bit_reverse_permute<T>(buffer: &mut [T]) {
    let n = buffer.len();
    debug_assert!(n == 0 || n.is_power_of_two());
    if n < 4 {
        return;
    }

    let mut j = 0;
    for i in 1..n {
        let mut k = n >> 1;
        while j >= k {
            j -= k;
            k >>= 1;
        }
        j += k;
        if i < j {
            buffer.swap(i, j);
        }
    }
}
