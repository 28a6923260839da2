//! Parameter discovery: from `(n, M_min)`, find `(q, ω, ω⁻¹, φ, φ⁻¹)`.
//! Grounded in `NTT.cpp`'s `solveParameters`, `new_modulus`,
//! `find_root_of_unity2`, and `find_generator`.

use crate::bigint::BigInt;
use crate::error::NttError;
use crate::math::{factorize, is_prime, mod_inverse, pow_mod, sqrt_mod};
use num_traits::{One, Zero};
use tracing::{debug, trace};

/// Bounds the modulus candidate search so a pathological `(n, M_min)` fails
/// fast with [`NttError::NoModulus`] instead of looping unboundedly. See
/// `SPEC_FULL.md` §9, Open Question 7.
const MODULUS_SEARCH_BUDGET: u64 = 1 << 20;

/// Bounds the generator search. Generators are dense in `(Z/qZ)*` (density
/// `phi(q-1)/(q-1)`), so this is never approached for a genuinely prime `q`;
/// it exists only to turn a would-be infinite loop into `NoGenerator`.
const GENERATOR_SEARCH_BUDGET: u64 = 1_000_000;

/// The parameter block an [`crate::Engine`] is built from.
#[derive(Debug, Clone)]
pub struct Params {
    pub q: BigInt,
    pub omega: BigInt,
    pub omega_inv: BigInt,
    pub phi: Option<BigInt>,
    pub phi_inv: Option<BigInt>,
}

/// Runs parameter discovery once for a given `(n, m_min)`.
pub fn solve(n: usize, m_min: &BigInt, modulus_is_prime_hint: bool) -> Result<Params, NttError> {
    let q = find_modulus(n, m_min, modulus_is_prime_hint)?;
    debug!(q = %q, "parameter solver: modulus accepted");

    let generator = find_generator(&q)?;
    let t = &q - BigInt::one();
    let omega = pow_mod(&generator, &(&t / BigInt::from(n)), &q);
    let omega_inv = mod_inverse(&omega, &q)?;

    let phi = sqrt_mod(&omega, &q).ok();
    let phi_inv = phi.as_ref().and_then(|p| mod_inverse(p, &q).ok());

    Ok(Params {
        q,
        omega,
        omega_inv,
        phi,
        phi_inv,
    })
}

/// Finds `q` with `q = 1 (mod n)`, `q >= m_min`, `q` prime.
fn find_modulus(n: usize, m_min: &BigInt, modulus_is_prime_hint: bool) -> Result<BigInt, NttError> {
    let n_big = BigInt::from(n);

    if modulus_is_prime_hint {
        // The hint only waives the primality search; q = 1 (mod n) still
        // has to hold, or the generator/omega derivation downstream
        // silently produces a non-root.
        if m_min % &n_big != BigInt::one() {
            return Err(NttError::NoModulus {
                n,
                m_min: m_min.clone(),
            });
        }
        return Ok(m_min.clone());
    }

    let mut k = if m_min.is_zero() {
        BigInt::zero()
    } else {
        (m_min - BigInt::one()) / &n_big
    };
    let mut q = &k * &n_big + BigInt::one();

    let mut attempts = 0u64;
    while q < *m_min || !is_prime(&q) {
        trace!(candidate = %q, "parameter solver: rejecting modulus candidate");
        attempts += 1;
        if attempts > MODULUS_SEARCH_BUDGET {
            return Err(NttError::NoModulus {
                n,
                m_min: m_min.clone(),
            });
        }
        k += BigInt::one();
        q = &k * &n_big + BigInt::one();
    }

    Ok(q)
}

/// Finds a generator `g` of `(Z/qZ)*` by trial, then the primitive `n`-th
/// root `omega := g^((q-1)/n) mod q`.
fn find_generator(q: &BigInt) -> Result<BigInt, NttError> {
    let t = q - BigInt::one();
    // factorize returns factors in non-decreasing order (2s stripped first,
    // then ascending odd candidates), so repeats are always adjacent and
    // `dedup` is sufficient; if that ordering guarantee ever changes, switch
    // to a sort + dedup or a BTreeSet here.
    let mut prime_factors = factorize(&t);
    prime_factors.dedup();

    let mut candidate = BigInt::from(2u32);
    for _ in 0..GENERATOR_SEARCH_BUDGET {
        if candidate >= *q {
            break;
        }

        let is_unit_order_t = pow_mod(&candidate, &t, q).is_one();
        let is_primitive = prime_factors
            .iter()
            .all(|p| pow_mod(&candidate, &(&t / p), q) != BigInt::one());

        if is_unit_order_t && is_primitive {
            return Ok(candidate);
        }
        candidate += BigInt::one();
    }

    Err(NttError::NoGenerator { q: q.clone() })
}
