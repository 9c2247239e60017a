use crate::Result;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    rngs::SmallRng,
    Rng, SeedableRng,
};

/// The random choices a sampling run makes.
pub trait RandomSource {
    /// An index in `0..len`, every index equally likely. `len` is positive.
    fn uniform(&mut self, len: usize) -> usize;

    /// An index into `weights`, chosen proportionally to its weight.
    fn weighted(&mut self, weights: &[f64]) -> Result<usize>;
}

/// [`RandomSource`] over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(SmallRng::from_os_rng())
    }
}

impl Default for RngSource<SmallRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }

    fn weighted(&mut self, weights: &[f64]) -> Result<usize> {
        let dist = WeightedIndex::<f64>::new(weights.iter().copied())?;
        Ok(dist.sample(&mut self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn seeded_is_reproducible() {
        let mut a = RngSource::seeded(3407);
        let mut b = RngSource::seeded(3407);
        for _ in 0..100 {
            assert_eq!(a.uniform(17), b.uniform(17));
            let w = [0.2, 0.3, 0.5];
            assert_eq!(a.weighted(&w).unwrap(), b.weighted(&w).unwrap());
        }
    }

    #[test]
    fn weighted_skips_zero_weights() {
        let mut src = RngSource::seeded(1);
        for _ in 0..1000 {
            assert_eq!(src.weighted(&[0.0, 1.0, 0.0]).unwrap(), 1);
        }
    }

    #[test]
    fn weighted_rejects_all_zero() {
        let mut src = RngSource::seeded(1);
        let res = src.weighted(&[0.0, 0.0]);
        assert!(matches!(res, Err(Error::Sampling(_))), "{res:?}");
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut src = RngSource::seeded(7);
        for _ in 0..1000 {
            assert!(src.uniform(3) < 3);
        }
    }
}
