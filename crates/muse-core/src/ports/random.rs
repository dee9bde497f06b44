/// Source of randomness for sampling steps, injectable so tests can fix the
/// outcome.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..upper`. Only called with `upper > 0`.
    fn next_index(&self, upper: usize) -> usize;
}
