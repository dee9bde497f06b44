//! Random source backed by the thread-local RNG.

use rand::Rng;

use muse_core::ports::RandomSource;

/// Unseeded randomness for production sampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}
