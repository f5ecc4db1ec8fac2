//! RNG seed derivation for deterministic deals.
//!
//! With a configured base seed, every match gets a distinct but reproducible
//! shuffle seed derived from the base and the registry's running game counter.

/// Derive the shuffle seed for the `game_no`-th match dealt by a registry.
pub fn derive_dealing_seed(base_seed: u64, game_no: u64) -> u64 {
    // SplitMix64 finaliser over the combined input; adjacent game numbers land far apart.
    let mut z = base_seed.wrapping_add(game_no.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
