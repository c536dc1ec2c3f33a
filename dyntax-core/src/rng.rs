//! Seeded random sources
//!
//! Every stochastic component receives its own handle derived from the single
//! experiment seed, so a run is reproducible end to end.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source handed to environments and agents
pub type SimRng = ChaCha8Rng;

/// Stream used by the environment's shock process
pub const ENV_STREAM: u64 = 0;

/// Stream used for agent exploration
pub const EXPLORATION_STREAM: u64 = 1;

/// Random source for `seed` on an independent `stream`
#[must_use]
pub fn seeded_rng(seed: u64, stream: u64) -> SimRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}
