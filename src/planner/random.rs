use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of random indices for the randomized search tier.
pub trait RandomSource {
    /// Index in `0..len`; 0 when `len <= 1`.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// Seeded generator for reproducible runs, entropy-seeded otherwise.
pub fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
