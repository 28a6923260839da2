use ntt::BigInt;
use rand::Rng;

fn random_bigint(rng: &mut impl Rng, below: u64) -> BigInt {
    BigInt::from(rng.random_range(1..below))
}

// These exercise the public re-exports a caller actually has access to
// (`Engine`/`Polynomial`/parameter discovery); the private `math`/`vecmath`
// modules get their direct, exhaustive coverage in their own `#[cfg(test)]`
// blocks. This file is the black-box analogue: it checks the number-theoretic
// facts a caller depends on without reaching into crate-private functions.

#[test]
fn omega_inverse_round_trips_for_several_moduli() {
    use ntt::{DirectMultiplier, Engine};

    for &(n, m_min) in &[(4usize, 17u64), (8, 97), (16, 12289)] {
        let engine = Engine::new(n, BigInt::from(m_min), Box::new(DirectMultiplier), false).unwrap();
        let product = (engine.omega() * engine.omega_inv()) % engine.modulus();
        assert_eq!(product, BigInt::from(1u32));
    }
}

#[test]
fn discovered_modulus_is_congruent_to_one_mod_n() {
    use ntt::{DirectMultiplier, Engine};

    let mut rng = rand::rng();
    for _ in 0..20 {
        let n = *[2usize, 4, 8, 16].get(rng.random_range(0..4)).unwrap();
        let floor = random_bigint(&mut rng, 5000);
        let engine = Engine::new(n, floor.clone(), Box::new(DirectMultiplier), false).unwrap();

        assert!(*engine.modulus() >= floor);
        assert_eq!(engine.modulus() % BigInt::from(n), BigInt::from(0u32));
    }
}

#[test]
fn bad_length_is_rejected_before_any_search_runs() {
    use ntt::{DirectMultiplier, Engine, NttError};

    assert!(matches!(
        Engine::new(0, BigInt::from(17u32), Box::new(DirectMultiplier), false),
        Err(NttError::BadLength { n: 0 })
    ));
    assert!(matches!(
        Engine::new(6, BigInt::from(17u32), Box::new(DirectMultiplier), false),
        Err(NttError::BadLength { n: 6 })
    ));
}

#[test]
fn modulus_is_prime_hint_takes_m_min_verbatim() {
    use ntt::{DirectMultiplier, Engine};

    // 17 is both prime and already ≡ 1 (mod 4), so the hinted path and the
    // searched path must agree.
    let hinted = Engine::new(4, BigInt::from(17u32), Box::new(DirectMultiplier), true).unwrap();
    let searched = Engine::new(4, BigInt::from(17u32), Box::new(DirectMultiplier), false).unwrap();
    assert_eq!(hinted.modulus(), searched.modulus());
}
