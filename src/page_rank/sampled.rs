use super::*;
use crate::{Corpus, Error, Ranks, Result};
use algograph::graph::VertexId;
use std::{cell::RefCell, collections::HashMap};

/// Estimates PageRank by walking the random-surfer chain and counting visits.
pub struct SampledPageRank<'a, S>
where
    S: RandomSource,
{
    corpus: &'a Corpus,
    damping: f64,
    samples: usize,
    source: RefCell<S>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: 10_000,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if self.samples == 0 {
            return Err(Error::InvalidConfiguration(
                "samples must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Output {
    pub page_rank: Ranks,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
}

impl<'a, S: RandomSource> SampledPageRank<'a, S> {
    pub fn new(corpus: &'a Corpus, config: &Config, source: S) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        Ok(Self {
            corpus,
            damping: config.damping,
            samples: config.samples,
            source: RefCell::new(source),
        })
    }

    /// Hands back the random source, e.g. to continue a seeded sequence.
    pub fn into_source(self) -> S {
        self.source.into_inner()
    }
}

impl<S: RandomSource> PageRank for SampledPageRank<'_, S> {
    type Output = self::Output;

    fn calc(&self) -> Result<Self::Output> {
        let pages = self.corpus.pages();
        let pick = |i: usize| -> Result<VertexId> {
            pages.get(i).copied().ok_or_else(|| {
                Error::InvalidConfiguration(format!(
                    "random source picked {i} out of {} pages",
                    pages.len()
                ))
            })
        };
        let mut source = self.source.borrow_mut();
        let mut visits: HashMap<_, _, ahash::RandomState> =
            pages.iter().map(|v| (*v, 0usize)).collect();

        let mut cur = pick(source.uniform(pages.len()))?;
        *visits.entry(cur).or_default() += 1;
        for _ in 1..self.samples {
            let weights = transition_weights(self.corpus, &cur, self.damping)?;
            cur = pick(source.weighted(&weights)?)?;
            *visits.entry(cur).or_default() += 1;
        }

        let n = self.samples as f64;
        let page_rank = visits.iter().map(|(v, c)| (*v, *c as f64 / n)).collect();
        tracing::debug!(
            pages = pages.len(),
            samples = self.samples,
            damping = self.damping,
            "sampled page rank"
        );
        Ok(Self::Output { page_rank, visits })
    }
}

impl PageRankResult for self::Output {
    fn page_rank(&self) -> &Ranks {
        &self.page_rank
    }

    fn debug<'a>(&'a self, corpus: &'a Corpus) -> impl std::fmt::Debug + 'a {
        OutputDebug {
            corpus,
            output: self,
        }
    }
}

pub struct OutputDebug<'a> {
    corpus: &'a Corpus,
    output: &'a self::Output,
}

impl std::fmt::Debug for OutputDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.corpus.pages() {
            let p = self.output.page_rank.get(v).copied().unwrap_or_default();
            let c = self.output.visits.get(v).copied().unwrap_or_default();
            writeln!(f, "{}: {p:?}, {c}", self.corpus.describe(v))?;
        }
        Ok(())
    }
}
