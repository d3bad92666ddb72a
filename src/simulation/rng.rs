use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Random source shared by every randomised decision in a world.
pub type SimRng = ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Create an RNG seeded from `seed` when given, otherwise from the thread RNG.
pub fn create_rng_from(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => SimRng::from_rng(&mut rand::rng()),
    }
}
