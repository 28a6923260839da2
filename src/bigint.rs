//! Arbitrary-precision unsigned integer facade used throughout the crate.
//!
//! This is a thin re-export over [`num_bigint::BigUint`] plus the handful of
//! free functions the rest of the crate expects (bit length, conversion to
//! and from machine integers). `BigUint` already gives us owned, structural
//! `+ − × / %`, `Ord`, and `Clone` for free, so there is no hand-rolled limb
//! type here — the source's heap-carrying `BigUnsigned` value type is simply
//! `num_bigint::BigUint` with this crate's naming.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Arbitrary-precision non-negative integer.
pub type BigInt = BigUint;

/// Number of bits needed to represent `a` (0 for zero).
pub fn bit_length(a: &BigInt) -> u64 {
    a.bits()
}

/// Build a [`BigInt`] from a `u64`.
pub fn from_u64(v: u64) -> BigInt {
    BigInt::from(v)
}

/// Build a [`BigInt`] from a `usize`.
pub fn from_usize(v: usize) -> BigInt {
    BigInt::from(v)
}

/// Truncate `a` to a `u64`, panicking if it does not fit.
///
/// Only ever called on values already known to be small (loop counters,
/// small prime candidates) — never on the working modulus or transform data.
pub fn to_u64(a: &BigInt) -> u64 {
    a.try_into()
        .unwrap_or_else(|_| panic!("BigInt {a} does not fit in u64"))
}

/// The constant zero.
pub fn zero() -> BigInt {
    BigInt::zero()
}

/// The constant one.
pub fn one() -> BigInt {
    BigInt::one()
}
