use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Source of the random draws consumed by the sampler and the generators.
///
/// Two sources built from the same seed and asked for the same sequence of
/// draws must yield identical values.
pub trait RandomSource {
    /// Uniform draw from `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform draw from `[0, bound)`. `bound` must be positive.
    fn uniform_below(&mut self, bound: usize) -> usize;

    /// Draw from the standard normal distribution.
    fn standard_normal(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn uniform_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        self.gen_range(0..bound)
    }

    fn standard_normal(&mut self) -> f64 {
        // Box-Muller; `u1` lies in (0, 1] so the logarithm is finite.
        let u1 = 1.0 - self.gen::<f64>();
        let u2 = self.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

/// Builds the generator used when no source is handed in explicitly.
///
/// Without a seed, one is drawn from the thread-local entropy-seeded generator.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    StdRng::seed_from_u64(seed)
}
