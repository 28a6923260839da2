//! The Residue Number System multiplier the NTT engine delegates its inner
//! products to (§4.2a). The engine only depends on the narrow
//! [`RnsMultiplier`] capability; [`ResidueMultiplier`] is a genuine
//! residue-decomposition-plus-CRT backend grounded in the "RNS accelerator"
//! named throughout the spec and the original `RNS.h`/`NTT.cpp` collaborator
//! (`rns.mult(a, b)`), while [`DirectMultiplier`] is the trivial backend used
//! in tests and as the crate default.

use crate::bigint::BigInt;
use crate::math::{is_prime, mod_inverse};
use num_traits::{One, Zero};

/// The capability the NTT engine consumes per butterfly: `a * b mod R` for
/// some `R` the implementation chooses, large enough that `R > q^2` for the
/// engine's modulus. The engine reduces the result mod `q` itself; it makes
/// no assumption about `R` beyond that bound.
pub trait RnsMultiplier: Send + Sync {
    fn mult(&self, a: &BigInt, b: &BigInt) -> BigInt;
}

/// Multiplies directly on the [`BigInt`] facade. `R` is effectively
/// unbounded, so the contract holds trivially. This is the crate's default
/// collaborator and the one used throughout the test suite, where isolating
/// NTT correctness from RNS correctness matters more than exercising the
/// accelerator.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectMultiplier;

impl RnsMultiplier for DirectMultiplier {
    fn mult(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * b
    }
}

/// A working Residue Number System multiplier: decomposes operands into
/// residues against a fixed set of pairwise-coprime `u64` moduli, multiplies
/// residue-wise, and reconstructs via CRT.
#[derive(Debug, Clone)]
pub struct ResidueMultiplier {
    moduli: Vec<u64>,
    /// `R = product(moduli)`.
    product: BigInt,
    /// `m_i = R / moduli[i]`.
    partial_products: Vec<BigInt>,
    /// `m_i^-1 mod moduli[i]`.
    partial_inverses: Vec<u64>,
}

impl ResidueMultiplier {
    /// Builds a residue system whose product modulus `R` has at least
    /// `min_bits` bits, by picking distinct primes downward from just under
    /// `2^62` (distinct primes are automatically pairwise coprime).
    ///
    /// `is_prime` here is trial division, so this gets expensive as moduli
    /// approach `2^62`; a production-scale RNS backend would swap in a
    /// Miller-Rabin test for candidates this large.
    pub fn with_min_bits(min_bits: u64) -> Self {
        let mut moduli = Vec::new();
        let mut product = BigInt::one();
        let mut candidate = BigInt::from((1u64 << 62) - 1);
        let one = BigInt::one();

        while crate::bigint::bit_length(&product) < min_bits {
            while !is_prime(&candidate) {
                candidate -= &one;
            }
            moduli.push(crate::bigint::to_u64(&candidate));
            product *= &candidate;
            candidate -= &one;
        }

        Self::from_moduli(moduli)
    }

    /// Builds a residue system from an explicit set of pairwise-coprime
    /// moduli (the caller is responsible for coprimality).
    pub fn from_moduli(moduli: Vec<u64>) -> Self {
        assert!(!moduli.is_empty(), "ResidueMultiplier needs at least one modulus");

        let product: BigInt = moduli.iter().map(|&m| BigInt::from(m)).product();

        let mut partial_products = Vec::with_capacity(moduli.len());
        let mut partial_inverses = Vec::with_capacity(moduli.len());

        for &m in &moduli {
            let m_big = BigInt::from(m);
            let partial = &product / &m_big;
            let inverse = mod_inverse(&(&partial % &m_big), &m_big)
                .expect("residue moduli must be pairwise coprime");
            partial_products.push(partial);
            partial_inverses.push(crate::bigint::to_u64(&inverse));
        }

        Self {
            moduli,
            product,
            partial_products,
            partial_inverses,
        }
    }

    /// The product modulus `R`.
    pub fn modulus(&self) -> &BigInt {
        &self.product
    }

    fn residues(&self, a: &BigInt) -> Vec<u64> {
        self.moduli
            .iter()
            .map(|&m| crate::bigint::to_u64(&(a % BigInt::from(m))))
            .collect()
    }

    /// Reconstructs `x mod R` from its residues via the standard CRT sum
    /// `x = sum_i residue_i * partial_i * partial_inv_i (mod R)`.
    fn reconstruct(&self, residues: &[u64]) -> BigInt {
        let mut acc = BigInt::zero();
        for ((residue, partial), inv) in residues
            .iter()
            .zip(&self.partial_products)
            .zip(&self.partial_inverses)
        {
            acc += BigInt::from(*residue) * partial * BigInt::from(*inv);
        }
        acc % &self.product
    }
}

impl RnsMultiplier for ResidueMultiplier {
    fn mult(&self, a: &BigInt, b: &BigInt) -> BigInt {
        let ra = self.residues(a);
        let rb = self.residues(b);

        let products: Vec<u64> = ra
            .iter()
            .zip(&rb)
            .zip(&self.moduli)
            .map(|((&x, &y), &m)| (((x as u128) * (y as u128)) % (m as u128)) as u64)
            .collect();

        self.reconstruct(&products)
    }
}
