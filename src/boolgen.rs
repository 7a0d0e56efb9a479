use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Source of independent coin flips used to pick node levels.
///
/// Not required to be safe for concurrent use; the skip log only calls it
/// while holding its write lock.
pub trait BitSource {
    /// Returns an unbiased random boolean.
    fn next_bool(&mut self) -> bool;
}

/// Closures make handy deterministic sources in tests.
impl<F: FnMut() -> bool> BitSource for F {
    fn next_bool(&mut self) -> bool {
        self()
    }
}

/// Default bit source.
///
/// Drawing a full `u64` per coin flip is wasteful, so 64 bits are cached
/// and handed out one at a time, refilling when the cache runs dry.
///
/// ```text
///   cache: 1011 0010 ... 0110      remaining: 64
///                               ▲
///          next_bool() reads the low bit, shifts right, remaining -= 1
/// ```
#[derive(Debug)]
pub struct BoolGen {
    rng: StdRng,
    cache: u64,
    remaining: u32,
}

impl BoolGen {
    /// Create a generator seeded once from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a generator with a fixed seed. Same seed, same bits.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        BoolGen {
            rng,
            cache: 0,
            remaining: 0,
        }
    }
}

impl Default for BoolGen {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSource for BoolGen {
    fn next_bool(&mut self) -> bool {
        if self.remaining == 0 {
            self.cache = self.rng.next_u64();
            self.remaining = u64::BITS;
        }

        let bit = self.cache & 1 == 1;
        self.cache >>= 1;
        self.remaining -= 1;

        bit
    }
}
