#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the pattern random source.

use rand_core::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use xmas_lights::rng::Rng;

#[test]
fn follows_the_seeded_pcg32_stream() {
    let mut rng = Rng::new(42);
    let mut pcg = Pcg32::seed_from_u64(42);
    for _ in 0..16 {
        assert_eq!(rng.next_u32(), pcg.next_u32());
    }
    assert_eq!(RngCore::next_u64(&mut rng), pcg.next_u64());
}

#[test]
fn same_seed_same_sequence() {
    let mut first = Rng::new(7);
    let mut second = Rng::new(7);
    let mut other = Rng::new(8);
    let a: Vec<u32> = (0..8).map(|_| first.next_u32()).collect();
    let b: Vec<u32> = (0..8).map(|_| second.next_u32()).collect();
    let c: Vec<u32> = (0..8).map(|_| other.next_u32()).collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn bounded_helpers_stay_in_range() {
    let mut rng = Rng::new(3);
    assert_eq!(rng.below(0), 0);
    for _ in 0..1000 {
        assert!(rng.below(7) < 7);
        assert!(rng.below_usize(140) < 140);
    }
    let heads = (0..1000).filter(|_| rng.coin()).count();
    assert!((300..700).contains(&heads), "{heads} heads");
}
