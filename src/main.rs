use rand::rng;

use ntt::{DirectMultiplier, Engine, Polynomial};

fn main() {
    tracing_subscriber::fmt::init();

    let n = 8;
    let m_min = ntt::BigInt::from(100u32);
    let engine = Engine::new(n, m_min, Box::new(DirectMultiplier), false)
        .expect("parameter discovery should succeed for this (n, M_min)");

    println!("q = {}", engine.modulus());
    println!("omega = {}", engine.omega());

    let mut generator = rng();
    let a = Polynomial::sample_random(n, engine.modulus(), &mut generator).unwrap();
    println!("a = {a}");

    let forward = engine.forward(&a).unwrap();
    let round_trip = engine.inverse(&forward).unwrap();
    println!("forward(a) = {forward}");
    println!("inverse(forward(a)) = {round_trip}");
    assert_eq!(round_trip.as_slice(), a.as_slice());

    // Convolution of two length-4 polynomials via a length-8 NTT.
    let ax = Polynomial::new(vec![
        ntt::BigInt::from(1u32),
        ntt::BigInt::from(2u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
    ])
    .unwrap();
    let bx = Polynomial::new(vec![
        ntt::BigInt::from(3u32),
        ntt::BigInt::from(4u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
        ntt::BigInt::from(0u32),
    ])
    .unwrap();

    let fa = engine.forward(&ax).unwrap();
    let fb = engine.forward(&bx).unwrap();
    let product: Vec<_> = fa
        .as_slice()
        .iter()
        .zip(fb.as_slice())
        .map(|(x, y)| (x * y) % engine.modulus())
        .collect();
    let convolution = engine.inverse(&Polynomial::from(product)).unwrap();

    println!("convolution = {convolution}");
}
