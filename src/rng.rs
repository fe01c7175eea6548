use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Seeded random source shared by the whole generation pass.
///
/// Owned explicitly and passed by `&mut` so several independent datasets
/// can be generated in one process without interfering with each other.
/// The same seed replays the same draw sequence.
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        SeededRng {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform real in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Standard normal draw.
    pub fn gaussian(&mut self) -> f64 {
        self.inner.sample(StandardNormal)
    }

    /// Uniform pick from a non-empty candidate slice.
    pub fn pick<'a, T>(&mut self, candidates: &'a [T]) -> &'a T {
        &candidates[self.inner.gen_range(0..candidates.len())]
    }

    /// Integer in [0, bound).
    pub fn int_below(&mut self, bound: u64) -> u64 {
        self.inner.gen_range(0..bound)
    }
}
