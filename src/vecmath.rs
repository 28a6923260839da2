//! Vector-level helpers shared by the parameter solver, the NTT engine, and
//! the reference transform. Grounded in `general_functions.cpp`'s
//! `bitReverse`, `hadamard_product`, `zero_pad`, and `mult_by_power`, and in
//! the teacher's `context::bit_reverse` for the bit-reversal primitive
//! itself.

use crate::bigint::BigInt;
use crate::math::pow_mod;

/// Bit-reversal of `number` within `bit_length` bits.
pub fn bit_reverse(number: usize, bit_length: u32) -> usize {
    let mut reversed = 0usize;
    for i in 0..bit_length {
        if (number >> i) & 1 != 0 {
            reversed |= 1 << (bit_length - 1 - i);
        }
    }
    reversed
}

/// Returns a new vector with `a[i]` placed at `reverse_bits(i, log2(|a|))`.
///
/// Panics if `|a|` is not a power of two; callers only ever invoke this on
/// lengths the engine has already validated.
pub fn bit_reverse_permute(a: &[BigInt]) -> Vec<BigInt> {
    let n = a.len();
    assert!(n.is_power_of_two(), "bit_reverse_permute: length {n} is not a power of two");

    let bits = n.trailing_zeros();
    let mut out = a.to_vec();
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = a[bit_reverse(i, bits)].clone();
    }
    out
}

/// Componentwise `(a[i] * b[i]) mod m`.
pub fn hadamard_product(a: &[BigInt], b: &[BigInt], m: &BigInt) -> Vec<BigInt> {
    assert_eq!(a.len(), b.len(), "hadamard_product: length mismatch");
    a.iter().zip(b).map(|(x, y)| (x * y) % m).collect()
}

/// `(v[i] * x^i) mod m`.
pub fn mult_by_power(v: &[BigInt], x: &BigInt, m: &BigInt) -> Vec<BigInt> {
    v.iter()
        .enumerate()
        .map(|(i, val)| (val * pow_mod(x, &BigInt::from(i), m)) % m)
        .collect()
}

/// Appends `|a|` zeros, doubling the length. Lifts a pointwise product of
/// two length-`n/2` polynomials into a length-`n` cyclic convolution that
/// equals their true (non-wrapping) product.
pub fn zero_pad(a: &[BigInt]) -> Vec<BigInt> {
    let mut out = a.to_vec();
    out.resize(a.len() * 2, BigInt::from(0u32));
    out
}

/// A length-`len` vector of `val`, used to build the `n^-1` scaling vector
/// consumed by [`hadamard_product`] in the inverse transform's final step.
pub fn constant_vector(len: usize, val: &BigInt) -> Vec<BigInt> {
    vec![val.clone(); len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::from_u64;

    #[test]
    fn bit_reverse_matches_known_values() {
        assert_eq!(bit_reverse(0, 3), 0);
        assert_eq!(bit_reverse(1, 3), 4);
        assert_eq!(bit_reverse(2, 3), 2);
        assert_eq!(bit_reverse(3, 3), 6);
        assert_eq!(bit_reverse(4, 3), 1);
        assert_eq!(bit_reverse(5, 3), 5);
        assert_eq!(bit_reverse(6, 3), 3);
        assert_eq!(bit_reverse(7, 3), 7);
    }

    #[test]
    fn bit_reverse_permute_length_4() {
        let a = vec![from_u64(10), from_u64(11), from_u64(12), from_u64(13)];
        // indices 0,1,2,3 bit-reversed over 2 bits -> 0,2,1,3
        let expected = vec![from_u64(10), from_u64(12), from_u64(11), from_u64(13)];
        assert_eq!(bit_reverse_permute(&a), expected);
    }

    #[test]
    #[should_panic(expected = "not a power of two")]
    fn bit_reverse_permute_rejects_non_power_of_two() {
        let a = vec![from_u64(1), from_u64(2), from_u64(3)];
        let _ = bit_reverse_permute(&a);
    }

    #[test]
    fn hadamard_product_basic() {
        let a = vec![from_u64(3), from_u64(5)];
        let b = vec![from_u64(4), from_u64(6)];
        let m = from_u64(17);
        assert_eq!(hadamard_product(&a, &b, &m), vec![from_u64(12), from_u64(13)]);
    }

    #[test]
    fn zero_pad_doubles_length_with_zeros() {
        let a = vec![from_u64(1), from_u64(2)];
        let padded = zero_pad(&a);
        assert_eq!(padded, vec![from_u64(1), from_u64(2), from_u64(0), from_u64(0)]);
    }

    #[test]
    fn mult_by_power_basic() {
        let v = vec![from_u64(1), from_u64(1), from_u64(1)];
        let m = from_u64(17);
        // x^0, x^1, x^2 for x = 2
        assert_eq!(
            mult_by_power(&v, &from_u64(2), &m),
            vec![from_u64(1), from_u64(2), from_u64(4)]
        );
    }

    #[test]
    fn constant_vector_basic() {
        assert_eq!(
            constant_vector(3, &from_u64(9)),
            vec![from_u64(9), from_u64(9), from_u64(9)]
        );
    }
}
