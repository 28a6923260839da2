//! The coefficient-vector newtype the engine transforms. Grounded in
//! `general_functions.cpp`'s `sample_polynomial`, `vectorsAreEqual`, and
//! `printVector` — but sampling draws full-width uniform residues from `rand`
//! rather than the source's `getRandomBigUnsigned` repeated-squaring of a
//! 31-bit seed (a low-entropy generator the spec's Design Notes call out
//! directly).

use crate::bigint::{self, BigInt};
use crate::error::NttError;
use rand::Rng;
use std::fmt;
use std::ops::Index;

/// Draws uniformly from `[0, modulus)` by rejection sampling over the
/// minimal big-endian byte width of `modulus`. Replaces the source's
/// `getRandomBigUnsigned`, which repeatedly squares a 31-bit seed and so
/// covers only a tiny fraction of the output space.
fn sample_uniform_below<R: Rng + ?Sized>(modulus: &BigInt, rng: &mut R) -> BigInt {
    let byte_len = (bigint::bit_length(modulus) as usize).div_ceil(8).max(1);
    let mut buf = vec![0u8; byte_len];
    loop {
        rng.fill(buf.as_mut_slice());
        let candidate = BigInt::from_bytes_be(&buf);
        if candidate < *modulus {
            return candidate;
        }
    }
}

/// A length-`n` vector of ring elements, `n` a power of two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial(Vec<BigInt>);

impl Polynomial {
    /// Wraps `coeffs`, requiring a power-of-two, non-empty length.
    pub fn new(coeffs: Vec<BigInt>) -> Result<Self, NttError> {
        if coeffs.is_empty() || !coeffs.len().is_power_of_two() {
            return Err(NttError::BadLength { n: coeffs.len() });
        }
        Ok(Self(coeffs))
    }

    /// Draws `n` coefficients uniformly from `[0, modulus)`.
    pub fn sample_random<R: Rng + ?Sized>(n: usize, modulus: &BigInt, rng: &mut R) -> Result<Self, NttError> {
        if n == 0 || !n.is_power_of_two() {
            return Err(NttError::BadLength { n });
        }
        let coeffs = (0..n).map(|_| sample_uniform_below(modulus, rng)).collect();
        Ok(Self(coeffs))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[BigInt] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<BigInt> {
        self.0
    }
}

impl Index<usize> for Polynomial {
    type Output = BigInt;
    fn index(&self, i: usize) -> &BigInt {
        &self.0[i]
    }
}

impl From<Vec<BigInt>> for Polynomial {
    /// Infallible conversion for callers that already know the length is a
    /// valid power of two (e.g. the engine's own internal buffers); panics
    /// otherwise, matching [`Polynomial::new`]'s contract.
    fn from(coeffs: Vec<BigInt>) -> Self {
        Self::new(coeffs).expect("Polynomial::from: length must be a non-zero power of two")
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}
