use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("corpus has no pages")]
    EmptyCorpus,

    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown page: {0}")]
    UnknownPage(String),

    #[error("no convergence after {iterations} iterations (max delta {delta})")]
    ConvergenceFailure { iterations: usize, delta: f64 },

    #[error("weighted sampling failed: {0}")]
    Sampling(#[from] rand::distr::weighted::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
