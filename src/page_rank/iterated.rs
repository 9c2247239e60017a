use super::*;
use crate::{norm_1, norm_inf, uniform, Corpus, Error, Ranks, Result};
use algograph::graph::VertexId;
use std::collections::BTreeMap;

/// Solves the PageRank equations by repeated sweeps until no page moves by
/// more than `epsilon`.
///
/// A dangling page spreads its rank evenly over the whole corpus.
pub struct IteratedPageRank<'a> {
    corpus: &'a Corpus,
    damping: f64,
    epsilon: f64,
    max_iterations: usize,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
    dangling: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            epsilon: 0.001,
            max_iterations: 10_000,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        // also rejects NaN
        if !(self.epsilon > 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "epsilon={} must be positive",
                self.epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfiguration(
                "max_iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Output {
    pub page_rank: Ranks,
    pub delta: Ranks,
    pub iterations: usize,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let mut transitions = BTreeMap::new();
        let mut dangling = vec![];
        for u in corpus.pages().iter() {
            let n = corpus.out_degree(u);
            if n == 0 {
                dangling.push(*u);
                continue;
            }
            let unit = 1.0 / (n as f64);
            for v in corpus.links(u) {
                transitions.insert((*u, v), unit);
            }
        }
        Ok(Self {
            corpus,
            damping: config.damping,
            epsilon: config.epsilon,
            max_iterations: config.max_iterations,
            transitions,
            dangling,
        })
    }

    /// Iterates from `start` instead of the uniform vector.
    ///
    /// Pages missing from `start` begin at 0. The values must be
    /// non-negative and sum to 1.
    pub fn calc_from(&self, start: &Ranks) -> Result<Output> {
        let damping = self.damping;
        let pages = self.corpus.pages();
        let n = pages.len() as f64;
        let mut p = {
            let mut p = Ranks::with_hasher(ahash::RandomState::new());
            let mut p_sum = 0.0;
            for v in pages.iter() {
                let w = start.get(v).copied().unwrap_or_default();
                if !(w >= 0.0) {
                    return Err(Error::InvalidConfiguration(format!(
                        "start rank of {} is {w}",
                        self.corpus.describe(v)
                    )));
                }
                p.insert(*v, w);
                p_sum += w;
            }
            if (p_sum - 1.0).abs() > 1e-7 {
                return Err(Error::InvalidConfiguration(format!(
                    "start ranks sum to {p_sum}"
                )));
            }
            p
        };
        let mut r = Ranks::with_hasher(ahash::RandomState::new());
        let mut delta = Ranks::with_hasher(ahash::RandomState::new());
        let mut max_delta = f64::INFINITY;
        for iterations in 1..=self.max_iterations {
            let dangling: f64 = self.dangling.iter().map(|v| p[v]).sum();
            let base = (1.0 - damping) / n + damping * dangling / n;
            r.clear();
            for v in pages.iter() {
                r.insert(*v, base);
            }
            for ((v0, v1), w) in self.transitions.iter() {
                if let Some(to) = r.get_mut(v1) {
                    *to += damping * p[v0] * w;
                }
            }

            delta.clear();
            for v in pages.iter() {
                delta.insert(*v, r[v] - p[v]);
            }
            max_delta = norm_inf(&delta);
            tracing::trace!(iterations, max_delta, l1 = norm_1(&delta), "sweep");

            if max_delta <= self.epsilon {
                tracing::debug!(
                    pages = pages.len(),
                    iterations,
                    max_delta,
                    "iterated page rank converged"
                );
                return Ok(Output {
                    page_rank: r,
                    delta,
                    iterations,
                });
            }

            std::mem::swap(&mut p, &mut r);
        }
        tracing::warn!(
            iterations = self.max_iterations,
            max_delta,
            "iterated page rank did not converge"
        );
        Err(Error::ConvergenceFailure {
            iterations: self.max_iterations,
            delta: max_delta,
        })
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Output = self::Output;

    fn calc(&self) -> Result<Self::Output> {
        self.calc_from(&uniform(self.corpus))
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
            let d = self.output.delta.get(v).copied().unwrap_or_default();
            writeln!(f, "{}: {p:?}, {d:?}", self.corpus.describe(v))?;
        }
        Ok(())
    }
}
