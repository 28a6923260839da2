//! Failure modes for parameter discovery and transforms.

use crate::bigint::BigInt;
use thiserror::Error;

/// Every way an [`crate::Engine`] can fail, per the construction/transform split.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NttError {
    #[error("transform length {n} is not a power of two >= 2")]
    BadLength { n: usize },

    #[error("expected a length-{expected} polynomial, got length {got}")]
    BadInput { expected: usize, got: usize },

    #[error("no prime q >= {m_min} with q = 1 (mod {n}) found within the search budget")]
    NoModulus { n: usize, m_min: BigInt },

    #[error("generator search exhausted [2, {q}) without finding a generator")]
    NoGenerator { q: BigInt },

    #[error("{a} has no inverse mod {m}: gcd(a, m) != 1")]
    NoInverse { a: BigInt, m: BigInt },

    #[error("no modular square root of {a} mod {m} exists")]
    NoSqrt { a: BigInt, m: BigInt },
}
