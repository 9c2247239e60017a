//! Two estimators of the random-surfer stationary distribution: a Monte-Carlo
//! walk ([`sampled`]) and a fixed-point iteration ([`iterated`]).

mod traits;
pub use self::traits::*;
pub mod iterated;
pub use self::iterated::IteratedPageRank;
pub mod random;
pub use self::random::{RandomSource, RngSource};
pub mod sampled;
pub use self::sampled::SampledPageRank;
pub mod transition;
pub use self::transition::{transition_model, transition_weights};

use crate::{Corpus, Error, Result};
use std::collections::BTreeMap;

pub const DEFAULT_DAMPING: f64 = 0.85;

/// Page ranks from `samples` steps of an entropy-seeded random walk.
pub fn sample_pagerank(
    corpus: &Corpus,
    damping: f64,
    samples: usize,
) -> Result<BTreeMap<String, f64>> {
    let config = sampled::Config { damping, samples };
    let spr = SampledPageRank::new(corpus, &config, RngSource::from_entropy())?;
    Ok(corpus.named(&spr.calc()?.page_rank))
}

/// Page ranks from iterating until no page moves by more than 0.001.
pub fn iterate_pagerank(corpus: &Corpus, damping: f64) -> Result<BTreeMap<String, f64>> {
    let config = iterated::Config {
        damping,
        ..iterated::Config::default()
    };
    let ipr = IteratedPageRank::new(corpus, &config)?;
    Ok(corpus.named(&ipr.calc()?.page_rank))
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "damping={damping} is not in [0, 1]"
        )))
    }
}
