//! Reproducible random number generation.
//!
//! Every ant draws from its own generator whose seed is derived from
//! `(run seed, iteration, ant index)`. Results therefore do not depend on
//! the order in which ants are scheduled, so sequential and parallel runs
//! are bit-identical.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator type used throughout the crate.
pub type AcoRng = ChaCha8Rng;

/// Creates a seeded generator.
pub fn create_rng(seed: u64) -> AcoRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Derives an independent stream seed for one ant of one iteration.
///
/// Uses SplitMix64 finalization so nearby `(iteration, ant)` pairs map to
/// well-separated seeds.
pub fn derive_seed(seed: u64, iteration: usize, ant: usize) -> u64 {
    let mut z = seed
        .wrapping_add((iteration as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add((ant as u64).wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
